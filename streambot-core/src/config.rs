// streambot-core/src/config.rs

use chrono_tz::Tz;
use serde::Deserialize;
use tracing::warn;

/// Runtime settings for the chat engine. Hosts typically deserialize this
/// from their own config file; every field has a sensible default.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// The bot's own chat identity; timers dispatch under this name.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    /// Per-user alert spam cooldown, in seconds.
    #[serde(default = "default_spam_cooldown")]
    pub spam_cooldown_seconds: u64,

    /// IANA time zone name used for cron timer math.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_bot_name() -> String {
    "streambot".to_string()
}

fn default_spam_cooldown() -> u64 {
    15
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            spam_cooldown_seconds: default_spam_cooldown(),
            timezone: default_timezone(),
        }
    }
}

impl BotConfig {
    /// Parsed time zone, falling back to UTC on a bad name.
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            warn!("unknown timezone '{}', falling back to UTC", self.timezone);
            chrono_tz::UTC
        })
    }
}
