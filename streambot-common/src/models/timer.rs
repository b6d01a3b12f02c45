use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted cron-scheduled command execution. Rows are created by the
/// reminder command or an external API; `next_run` and row existence are
/// mutated only by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub timer_id: Uuid,
    /// The bot identity the command runs under when the timer fires.
    pub bot_name: String,
    /// Full command line to dispatch, e.g. `!alert hydrate Reminder: water`.
    pub command: String,
    /// Five-field cron expression (minute hour day month weekday).
    pub cron: String,
    /// Next scheduled firing; `None` until the scheduler reconciles the row.
    pub next_run: Option<DateTime<Utc>>,
    pub repeat: bool,
    pub active: bool,
}

impl Timer {
    pub fn new(bot_name: &str, command: &str, cron: &str, repeat: bool) -> Self {
        Self {
            timer_id: Uuid::new_v4(),
            bot_name: bot_name.to_string(),
            command: command.to_string(),
            cron: cron.to_string(),
            next_run: None,
            repeat,
            active: true,
        }
    }
}
