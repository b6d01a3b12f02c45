use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A ranked chat permission tier. Ordering follows the declaration order,
/// lowest (`Chat`) to highest (`Admin`); never compare by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Chat,
    Subscriber,
    Vip,
    Moderator,
    Broadcaster,
    Admin,
}

impl Badge {
    pub const LEVELS: [Badge; 6] = [
        Badge::Chat,
        Badge::Subscriber,
        Badge::Vip,
        Badge::Moderator,
        Badge::Broadcaster,
        Badge::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::Chat => "chat",
            Badge::Subscriber => "subscriber",
            Badge::Vip => "vip",
            Badge::Moderator => "moderator",
            Badge::Broadcaster => "broadcaster",
            Badge::Admin => "admin",
        }
    }

    /// Position in the fixed tier order.
    pub fn level(&self) -> usize {
        *self as usize
    }

    /// Parses a badge string from chat tags. Unknown strings are logged and
    /// excluded from ordering (treated as absent).
    pub fn parse(s: &str) -> Option<Badge> {
        match s {
            "chat" => Some(Badge::Chat),
            "subscriber" => Some(Badge::Subscriber),
            "vip" => Some(Badge::Vip),
            "moderator" => Some(Badge::Moderator),
            "broadcaster" => Some(Badge::Broadcaster),
            "admin" => Some(Badge::Admin),
            other => {
                warn!("possibly new badge: {}", other);
                None
            }
        }
    }

    /// All badge names, sorted alphabetically for help text.
    pub fn sorted_names() -> Vec<String> {
        let mut names: Vec<String> = Self::LEVELS.iter().map(|b| b.as_str().to_string()).collect();
        names.sort();
        names
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowest tier present, defaulting to `Chat` for empty input.
pub fn min_badge(badges: &[Badge]) -> Badge {
    badges.iter().copied().min().unwrap_or(Badge::Chat)
}

/// Highest tier present, defaulting to `Chat` for empty input.
pub fn max_badge(badges: &[Badge]) -> Badge {
    badges.iter().copied().max().unwrap_or(Badge::Chat)
}

/// True iff the user's best badge ranks at or above `required`.
pub fn badge_check(user_badges: &[Badge], required: Badge) -> bool {
    max_badge(user_badges).level() >= required.level()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_totally_ordered() {
        for pair in Badge::LEVELS.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn badge_check_is_asymmetric_across_tiers() {
        for (i, higher) in Badge::LEVELS.iter().enumerate() {
            for lower in &Badge::LEVELS[..i] {
                assert!(badge_check(&[*higher], *lower));
                assert!(!badge_check(&[*lower], *higher));
            }
        }
    }

    #[test]
    fn empty_badges_default_to_chat() {
        assert_eq!(min_badge(&[]), Badge::Chat);
        assert_eq!(max_badge(&[]), Badge::Chat);
        assert!(badge_check(&[], Badge::Chat));
        assert!(!badge_check(&[], Badge::Subscriber));
    }

    #[test]
    fn max_badge_picks_highest() {
        let badges = [Badge::Vip, Badge::Chat, Badge::Subscriber];
        assert_eq!(max_badge(&badges), Badge::Vip);
        assert_eq!(min_badge(&badges), Badge::Chat);
    }

    #[test]
    fn unknown_badge_parses_to_none() {
        assert_eq!(Badge::parse("founder"), None);
        assert_eq!(Badge::parse("moderator"), Some(Badge::Moderator));
    }
}
