//! Builds the flat name -> command table the dispatcher works from.
//!
//! `build_registry` is a pure function invoked before every single dispatch:
//! always fresh, never stale, so edits to alias/timer storage take effect
//! without restarting the process. Per-message CPU traded for correctness,
//! acceptable at chat-message rates.

use std::collections::HashMap;

use tracing::warn;

use streambot_common::{
    Alias, ArgToken, Badge, Command, CommandAction, CommandFormat, CommandGroup, min_badge,
};

use crate::services::alias_resolver::resolve_alias;

fn cmd(
    name: &str,
    group: CommandGroup,
    required_badge: Badge,
    args: Vec<ArgToken>,
    help: &str,
    action: CommandAction,
) -> Command {
    Command {
        name: name.to_string(),
        group,
        required_badge,
        format: CommandFormat::new(args),
        help: help.to_string(),
        action,
    }
}

fn count_commands() -> Vec<Command> {
    use CommandAction::*;
    use CommandGroup::Counts;
    vec![
        cmd("list_counts", Counts, Badge::Chat, vec![], "!list_counts", ListCounts),
        cmd(
            "get_count",
            Counts,
            Badge::Chat,
            vec![ArgToken::Word],
            "!get_count count_name",
            GetCount,
        ),
        cmd(
            "set_count",
            Counts,
            Badge::Vip,
            vec![ArgToken::Word, ArgToken::Int],
            "!set_count count_name number",
            SetCount,
        ),
        cmd(
            "copy_count",
            Counts,
            Badge::Vip,
            vec![ArgToken::Word, ArgToken::Word],
            "!copy_count count_from count_to",
            CopyCount,
        ),
        cmd(
            "reset_count",
            Counts,
            Badge::Vip,
            vec![ArgToken::Words { min: 1 }],
            "!reset_count count_name1 count_name2 ...",
            ResetCount,
        ),
        cmd(
            "remove_count",
            Counts,
            Badge::Vip,
            vec![ArgToken::Word],
            "!remove_count count_name",
            RemoveCount,
        ),
        cmd(
            "add_count",
            Counts,
            Badge::Vip,
            vec![ArgToken::Word],
            "!add_count count_name",
            AddCount,
        ),
        cmd(
            "subtract_count",
            Counts,
            Badge::Vip,
            vec![ArgToken::Word],
            "!subtract_count count_name",
            SubtractCount,
        ),
    ]
}

fn list_commands() -> Vec<Command> {
    use CommandAction::*;
    use CommandGroup::Lists;
    vec![
        cmd("list_lists", Lists, Badge::Chat, vec![], "!list_lists", ListLists),
        cmd(
            "get_list_item",
            Lists,
            Badge::Chat,
            vec![ArgToken::Word, ArgToken::Selector],
            "!get_list_item list_name [index]/next/random",
            GetListItem,
        ),
        cmd(
            "get_list_size",
            Lists,
            Badge::Chat,
            vec![ArgToken::Word],
            "!get_list_size list_name",
            GetListSize,
        ),
        cmd(
            "add_list_item",
            Lists,
            Badge::Vip,
            vec![ArgToken::Word, ArgToken::Text],
            "!add_list_item list_name item to include in list",
            AddListItem,
        ),
        cmd(
            "remove_list_item",
            Lists,
            Badge::Vip,
            vec![ArgToken::Word, ArgToken::Int],
            "!remove_list_item list_name index",
            RemoveListItem,
        ),
        cmd(
            "remove_list",
            Lists,
            Badge::Broadcaster,
            vec![ArgToken::Word],
            "!remove_list list_name",
            RemoveList,
        ),
    ]
}

fn alert_commands() -> Vec<Command> {
    use CommandAction::*;
    use CommandGroup::Alerts;
    vec![
        cmd(
            "alert",
            Alerts,
            Badge::Vip,
            vec![ArgToken::Word, ArgToken::TailText],
            "!alert alert_name [display text]",
            Alert,
        ),
        cmd(
            "tag",
            Alerts,
            Badge::Vip,
            vec![ArgToken::Word, ArgToken::TailText],
            "!tag tag_name [display text]",
            Tag,
        ),
        cmd("ban", Alerts, Badge::Vip, vec![ArgToken::Word], "!ban chatter", Ban),
        cmd(
            "unban",
            Alerts,
            Badge::Vip,
            vec![ArgToken::Word],
            "!unban banned_chatter",
            Unban,
        ),
    ]
}

fn timer_commands() -> Vec<Command> {
    use CommandGroup::Timers;
    vec![cmd(
        "reminder",
        Timers,
        Badge::Vip,
        vec![ArgToken::OptionalWord, ArgToken::Int, ArgToken::Text],
        "!reminder [alert_or_tag] minutes message",
        CommandAction::Reminder,
    )]
}

fn core_commands() -> Vec<Command> {
    use CommandAction::*;
    use CommandGroup::Core;
    vec![
        cmd(
            "echo",
            Core,
            Badge::Broadcaster,
            vec![ArgToken::Text],
            "!echo message",
            Echo,
        ),
        cmd("help", Core, Badge::Chat, vec![], "!help", Help),
        cmd(
            "random",
            Core,
            Badge::Vip,
            vec![ArgToken::Words { min: 2 }],
            "!random option1 option2 [option3 ...]",
            Random,
        ),
        cmd(
            "spongebob",
            Core,
            Badge::Subscriber,
            vec![ArgToken::Text],
            "!spongebob message",
            Spongebob,
        ),
        cmd(
            "taco",
            Core,
            Badge::Subscriber,
            vec![ArgToken::Word],
            "!taco [to_user]",
            Taco,
        ),
    ]
}

/// Lowest required badge across a group's registered commands; `Chat` when
/// the group is empty, so the introspection command itself stays visible.
fn group_floor(registry: &HashMap<String, Command>, group: CommandGroup) -> Badge {
    let badges: Vec<Badge> = registry
        .values()
        .filter(|c| c.group == group)
        .map(|c| c.required_badge)
        .collect();
    min_badge(&badges)
}

/// Introspection commands are generated from the already-merged groups, so
/// they must be built after them.
fn introspection_commands(
    registry: &HashMap<String, Command>,
    alias_rows: &[Alias],
) -> Vec<Command> {
    let menu = Badge::sorted_names();
    let arg = vec![ArgToken::OptionalChoice(menu.clone())];
    let menu_help = menu.join(" | ");
    let alias_floor = min_badge(&alias_rows.iter().map(|a| a.badge).collect::<Vec<_>>());

    let entry = |name: &str, badge: Badge, group: CommandGroup| {
        cmd(
            name,
            CommandGroup::Core,
            badge,
            arg.clone(),
            &format!("!{} [{}]", name, menu_help),
            CommandAction::ShowCommands { group },
        )
    };

    vec![
        entry("get_commands", Badge::Chat, CommandGroup::Core),
        entry(
            "get_count_commands",
            group_floor(registry, CommandGroup::Counts),
            CommandGroup::Counts,
        ),
        entry(
            "get_list_commands",
            group_floor(registry, CommandGroup::Lists),
            CommandGroup::Lists,
        ),
        entry(
            "get_alert_commands",
            group_floor(registry, CommandGroup::Alerts),
            CommandGroup::Alerts,
        ),
        entry(
            "get_timer_commands",
            group_floor(registry, CommandGroup::Timers),
            CommandGroup::Timers,
        ),
        entry("get_aliases", alias_floor, CommandGroup::Alias),
    ]
}

/// Merges the command groups in a fixed order: counts, lists, alerts, timers,
/// core, then introspection (derived from the merged groups), then aliases
/// resolved last against the built-in table. An alias colliding with a
/// built-in name is dropped, never shadowing it.
pub fn build_registry(alias_rows: &[Alias]) -> HashMap<String, Command> {
    let mut registry = HashMap::new();
    for group in [
        count_commands(),
        list_commands(),
        alert_commands(),
        timer_commands(),
        core_commands(),
    ] {
        for command in group {
            registry.insert(command.name.clone(), command);
        }
    }
    for command in introspection_commands(&registry, alias_rows) {
        registry.insert(command.name.clone(), command);
    }

    // Aliases resolve against a frozen builtin snapshot, so an alias can
    // never target another alias.
    let resolved: Vec<Command> = alias_rows
        .iter()
        .filter_map(|row| {
            if registry.contains_key(&row.alias) {
                warn!("alias '{}' collides with a builtin command; dropped", row.alias);
                return None;
            }
            resolve_alias(row, &registry)
        })
        .collect();
    for command in resolved {
        registry.insert(command.name.clone(), command);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_groups_are_all_present() {
        let registry = build_registry(&[]);
        for name in [
            "echo", "help", "random", "spongebob", "taco", "get_count", "set_count",
            "get_list_item", "alert", "tag", "ban", "unban", "reminder", "get_commands",
            "get_count_commands", "get_aliases",
        ] {
            assert!(registry.contains_key(name), "missing builtin {}", name);
        }
    }

    #[test]
    fn introspection_floor_tracks_group_minimum() {
        let registry = build_registry(&[]);
        // counts has chat-tier members, so its listing is chat-visible
        assert_eq!(registry["get_count_commands"].required_badge, Badge::Chat);
        // every alert command requires vip
        assert_eq!(registry["get_alert_commands"].required_badge, Badge::Vip);
        assert_eq!(registry["get_timer_commands"].required_badge, Badge::Vip);
    }

    #[test]
    fn alias_floor_defaults_to_chat_when_empty() {
        let registry = build_registry(&[]);
        assert_eq!(registry["get_aliases"].required_badge, Badge::Chat);
    }

    #[test]
    fn alias_colliding_with_builtin_is_dropped() {
        let rows = vec![Alias::new("echo", "!set_count test_count", Badge::Chat)];
        let registry = build_registry(&rows);
        assert_eq!(registry["echo"].action, CommandAction::Echo);
    }

    #[test]
    fn alias_with_unknown_target_is_dropped() {
        let rows = vec![Alias::new("mystery", "!no_such_command", Badge::Chat)];
        let registry = build_registry(&rows);
        assert!(!registry.contains_key("mystery"));
    }

    #[test]
    fn alias_registers_with_its_own_badge() {
        let rows = vec![Alias::new("oops", "!add_count deaths", Badge::Chat)];
        let registry = build_registry(&rows);
        let alias = &registry["oops"];
        assert_eq!(alias.required_badge, Badge::Chat);
        assert_eq!(alias.group, CommandGroup::Alias);
        assert!(alias.format.matches(""));
        assert!(!alias.format.matches("extra"));
    }

    #[test]
    fn alias_cannot_target_another_alias() {
        let rows = vec![
            Alias::new("first", "!add_count deaths", Badge::Chat),
            Alias::new("second", "!first", Badge::Chat),
        ];
        let registry = build_registry(&rows);
        assert!(registry.contains_key("first"));
        assert!(!registry.contains_key("second"));
    }
}
