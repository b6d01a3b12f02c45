use std::collections::HashMap;

use streambot_common::{Badge, Command, CommandGroup, max_badge};

/// Lists a group's command names visible at a badge rank. The rank is the
/// argument badge name when one was typed, otherwise the viewer's own
/// highest badge.
pub(crate) fn show_commands(
    registry: &HashMap<String, Command>,
    group: CommandGroup,
    remainder: &str,
    badges: &[Badge],
) -> Vec<String> {
    let wanted = remainder.trim();
    let viewer = if wanted.is_empty() {
        Some(max_badge(badges))
    } else {
        Badge::parse(wanted)
    };
    let mut names: Vec<&str> = match viewer {
        Some(rank) => registry
            .values()
            .filter(|c| c.group == group && c.required_badge <= rank)
            .map(|c| c.name.as_str())
            .collect(),
        None => Vec::new(),
    };
    names.sort_unstable();

    if names.is_empty() {
        vec!["No commands available".to_string()]
    } else {
        vec![format!("Commands include: {}", names.join(", "))]
    }
}
