//! Derives a runnable command from a persisted alias row by introspecting its
//! target command. Derivation failures drop the alias from the live registry;
//! they are logged, never surfaced to a caller.

use std::collections::HashMap;

use tracing::info;

use streambot_common::{Alias, Command, CommandAction, CommandGroup};

/// Resolves one alias row against the already-built builtin table.
pub fn resolve_alias(row: &Alias, builtins: &HashMap<String, Command>) -> Option<Command> {
    let target = row.command.trim();
    let mut words = target.split_whitespace();
    let head = words.next().unwrap_or_default();
    let Some(target_name) = head.strip_prefix('!') else {
        info!("not adding alias '{}': target '{}' is not a command", row.alias, target);
        return None;
    };
    let fixed: Vec<&str> = words.collect();

    let Some(original) = builtins.get(target_name) else {
        info!("not adding alias '{}': unknown target '{}'", row.alias, target_name);
        return None;
    };

    // The fixed words baked into the target text must consume a prefix of the
    // original format; what remains becomes the alias's own format.
    let Some(format) = original.format.split_fixed_prefix(&fixed) else {
        info!("not adding alias '{}' due to formatting", row.alias);
        return None;
    };

    Some(Command {
        name: row.alias.clone(),
        group: CommandGroup::Alias,
        required_badge: row.badge,
        format,
        help: derive_help(&row.alias, &original.help, fixed.len()),
        action: CommandAction::Alias {
            target: target.to_string(),
        },
    })
}

/// The alias help keeps the original's trailing words for whatever arguments
/// the alias does not already fix.
fn derive_help(alias: &str, original_help: &str, fixed_args: usize) -> String {
    let words: Vec<&str> = original_help.split_whitespace().collect();
    let expected_args = words.len().saturating_sub(1);
    if fixed_args < expected_args {
        format!("!{} {}", alias, words[fixed_args + 1..].join(" "))
    } else {
        format!("!{}", alias)
    }
}
