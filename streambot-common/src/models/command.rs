use serde::{Deserialize, Serialize};

use crate::models::badge::Badge;

/// Which builtin group a command was registered under. Introspection commands
/// (`get_commands`, `get_*_commands`) count as `Core`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandGroup {
    Counts,
    Lists,
    Alerts,
    Timers,
    Core,
    Alias,
}

/// One argument slot in a command's accepted format. The format is an ordered
/// token list rather than an opaque pattern, so deriving an alias's format is a
/// list operation (`CommandFormat::split_fixed_prefix`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgToken {
    /// One non-whitespace word.
    Word,
    /// One unsigned integer word.
    Int,
    /// The non-empty rest of the line.
    Text,
    /// The rest of the line, possibly empty.
    TailText,
    /// Zero or one word.
    OptionalWord,
    /// At least `min` words, consuming the rest of the line.
    Words { min: usize },
    /// One word from a fixed set.
    Choice(Vec<String>),
    /// Zero or one word from a fixed set.
    OptionalChoice(Vec<String>),
    /// A list selector: `next`, `random`, or a (possibly negative) index.
    Selector,
}

impl ArgToken {
    /// Whether a single word satisfies this token. Only meaningful for the
    /// single-word token kinds.
    fn accepts(&self, word: &str) -> bool {
        match self {
            ArgToken::Word | ArgToken::OptionalWord => true,
            ArgToken::Int => !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()),
            ArgToken::Choice(names) | ArgToken::OptionalChoice(names) => {
                names.iter().any(|n| n == word)
            }
            ArgToken::Selector => {
                word == "next"
                    || word == "random"
                    || word.strip_prefix('-').unwrap_or(word).chars().all(|c| c.is_ascii_digit())
                        && !word.trim_start_matches('-').is_empty()
            }
            ArgToken::Text | ArgToken::TailText | ArgToken::Words { .. } => false,
        }
    }
}

/// The accepted format of a command's remainder text (everything after the
/// `!name` part), as an ordered token list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandFormat {
    pub args: Vec<ArgToken>,
}

impl CommandFormat {
    pub fn new(args: Vec<ArgToken>) -> Self {
        Self { args }
    }

    /// Accept/reject the remainder text. Capture is not needed; handlers
    /// receive the raw remainder string.
    pub fn matches(&self, remainder: &str) -> bool {
        let words: Vec<&str> = remainder.split_whitespace().collect();
        match_tokens(&self.args, &words)
    }

    /// Finds the boundary between a fixed literal prefix and the free-form
    /// suffix: consumes `fixed` (the argument words an alias bakes in) against
    /// a prefix of the token list and returns the format of what remains.
    /// `None` means the fixed words cannot be a prefix of this format.
    pub fn split_fixed_prefix(&self, fixed: &[&str]) -> Option<CommandFormat> {
        consume_fixed(&self.args, fixed).map(CommandFormat::new)
    }
}

fn match_tokens(tokens: &[ArgToken], words: &[&str]) -> bool {
    let Some((first, rest)) = tokens.split_first() else {
        return words.is_empty();
    };
    match first {
        ArgToken::Word | ArgToken::Int | ArgToken::Choice(_) | ArgToken::Selector => {
            !words.is_empty() && first.accepts(words[0]) && match_tokens(rest, &words[1..])
        }
        ArgToken::OptionalWord => {
            (!words.is_empty() && match_tokens(rest, &words[1..])) || match_tokens(rest, words)
        }
        ArgToken::OptionalChoice(names) => {
            (!words.is_empty()
                && names.iter().any(|n| n == words[0])
                && match_tokens(rest, &words[1..]))
                || match_tokens(rest, words)
        }
        ArgToken::Text => !words.is_empty(),
        ArgToken::TailText => true,
        ArgToken::Words { min } => words.len() >= *min,
    }
}

/// Consumes the fixed words against a prefix of the token list, mirroring the
/// smallest-prefix rule: the boundary lands as early as possible, and skipped
/// optional tokens still count as consumed.
fn consume_fixed(tokens: &[ArgToken], fixed: &[&str]) -> Option<Vec<ArgToken>> {
    if fixed.is_empty() {
        return Some(tokens.to_vec());
    }
    let (first, rest) = tokens.split_first()?;
    match first {
        ArgToken::Word | ArgToken::Int | ArgToken::Choice(_) | ArgToken::Selector => {
            if first.accepts(fixed[0]) {
                consume_fixed(rest, &fixed[1..])
            } else {
                None
            }
        }
        ArgToken::OptionalWord => consume_fixed(rest, &fixed[1..]),
        ArgToken::OptionalChoice(names) => {
            if names.iter().any(|n| n == fixed[0]) {
                consume_fixed(rest, &fixed[1..])
            } else {
                consume_fixed(rest, fixed)
            }
        }
        ArgToken::Text | ArgToken::TailText => Some(rest.to_vec()),
        ArgToken::Words { min } => {
            if fixed.len() >= *min {
                Some(rest.to_vec())
            } else {
                None
            }
        }
    }
}

/// What a command does when invoked. A tagged variant rather than a captured
/// closure, so execution is a single dispatch `match` and unit-testable
/// without a live transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    // core
    Echo,
    Help,
    Random,
    Spongebob,
    Taco,
    // counts
    ListCounts,
    GetCount,
    SetCount,
    CopyCount,
    ResetCount,
    RemoveCount,
    AddCount,
    SubtractCount,
    // lists
    ListLists,
    GetListItem,
    GetListSize,
    AddListItem,
    RemoveListItem,
    RemoveList,
    // alerts
    Alert,
    Tag,
    Ban,
    Unban,
    // timers
    Reminder,
    // introspection
    ShowCommands { group: CommandGroup },
    // alias redirection: re-enters the dispatcher with
    // `<target> <typed suffix>` and badge checks bypassed.
    Alias { target: String },
}

/// A runnable chat command. Ephemeral: the registry is rebuilt from scratch
/// before every dispatch, so these are never mutated in place.
#[derive(Debug, Clone)]
pub struct Command {
    pub name: String,
    pub group: CommandGroup,
    pub required_badge: Badge,
    pub format: CommandFormat,
    pub help: String,
    pub action: CommandAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_count_format() -> CommandFormat {
        CommandFormat::new(vec![ArgToken::Word, ArgToken::Int])
    }

    #[test]
    fn word_int_format_matching() {
        let fmt = set_count_format();
        assert!(fmt.matches("test_count 10"));
        assert!(!fmt.matches("test_count ten"));
        assert!(!fmt.matches("test count 10"));
        assert!(!fmt.matches("test_count"));
        assert!(!fmt.matches(""));
    }

    #[test]
    fn words_min_two() {
        let fmt = CommandFormat::new(vec![ArgToken::Words { min: 2 }]);
        assert!(fmt.matches("a b"));
        assert!(fmt.matches("a b c d"));
        assert!(!fmt.matches("a"));
        assert!(!fmt.matches(""));
    }

    #[test]
    fn optional_word_backtracks() {
        // !reminder [alert_or_tag] minutes message
        let fmt = CommandFormat::new(vec![ArgToken::OptionalWord, ArgToken::Int, ArgToken::Text]);
        assert!(fmt.matches("my_alert 30 do the thing"));
        assert!(fmt.matches("30 do the thing"));
        assert!(!fmt.matches("30"));
        assert!(!fmt.matches("my_alert thirty stuff"));
    }

    #[test]
    fn optional_choice_accepts_empty_and_member() {
        let fmt = CommandFormat::new(vec![ArgToken::OptionalChoice(vec![
            "chat".into(),
            "vip".into(),
        ])]);
        assert!(fmt.matches(""));
        assert!(fmt.matches("vip"));
        assert!(!fmt.matches("non-existent-badge"));
    }

    #[test]
    fn selector_kinds() {
        let fmt = CommandFormat::new(vec![ArgToken::Word, ArgToken::Selector]);
        assert!(fmt.matches("quotes next"));
        assert!(fmt.matches("quotes random"));
        assert!(fmt.matches("quotes 3"));
        assert!(fmt.matches("quotes -1"));
        assert!(!fmt.matches("quotes first"));
    }

    #[test]
    fn fixed_prefix_boundary_on_word_int() {
        // alias "!myalias" -> "!set_count test_count": the fixed word consumes
        // Word, leaving Int for the typed suffix.
        let fmt = set_count_format();
        let derived = fmt.split_fixed_prefix(&["test_count"]).unwrap();
        assert!(derived.matches("10"));
        assert!(!derived.matches("ten"));
        assert!(!derived.matches(""));
    }

    #[test]
    fn fixed_prefix_consumes_everything() {
        let fmt = set_count_format();
        let derived = fmt.split_fixed_prefix(&["test_count", "10"]).unwrap();
        assert!(derived.matches(""));
        assert!(!derived.matches("extra"));
    }

    #[test]
    fn fixed_prefix_rejects_type_mismatch() {
        let fmt = set_count_format();
        assert!(fmt.split_fixed_prefix(&["test_count", "ten"]).is_none());
        assert!(fmt.split_fixed_prefix(&["a", "1", "extra"]).is_none());
    }

    #[test]
    fn fixed_prefix_with_empty_fixed_keeps_format() {
        let fmt = CommandFormat::new(vec![ArgToken::OptionalChoice(vec!["vip".into()])]);
        let derived = fmt.split_fixed_prefix(&[]).unwrap();
        assert_eq!(derived, fmt);
    }

    #[test]
    fn fixed_prefix_through_optional_word() {
        // "!reminder 30" bakes the optional slot in, leaving minutes + message.
        let fmt = CommandFormat::new(vec![ArgToken::OptionalWord, ArgToken::Int, ArgToken::Text]);
        let derived = fmt.split_fixed_prefix(&["30"]).unwrap();
        assert_eq!(
            derived,
            CommandFormat::new(vec![ArgToken::Int, ArgToken::Text])
        );
    }

    #[test]
    fn fixed_prefix_into_tail_text() {
        // "!alert test_text_1" against Word + TailText leaves optional text.
        let fmt = CommandFormat::new(vec![ArgToken::Word, ArgToken::TailText]);
        let derived = fmt.split_fixed_prefix(&["test_text_1"]).unwrap();
        assert!(derived.matches(""));
        assert!(derived.matches("extra words"));
    }

    #[test]
    fn fixed_prefix_under_words_minimum_fails() {
        let fmt = CommandFormat::new(vec![ArgToken::Words { min: 2 }]);
        assert!(fmt.split_fixed_prefix(&["a"]).is_none());
        assert!(fmt.split_fixed_prefix(&["a", "b"]).is_some());
    }
}
