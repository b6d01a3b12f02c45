use serde::{Deserialize, Serialize};

use crate::models::badge::Badge;

/// A persisted alias row: an alternate command name that bakes a fixed prefix
/// of arguments into an existing command, with its own permission floor.
/// CRUD is a host concern; the registry consumes these read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Unique alias name, without the leading `!`.
    pub alias: String,
    /// Full target command line, e.g. `!set_count test_count`.
    pub command: String,
    pub badge: Badge,
}

impl Alias {
    pub fn new(alias: &str, command: &str, badge: Badge) -> Self {
        Self {
            alias: alias.to_string(),
            command: command.to_string(),
            badge,
        }
    }
}
