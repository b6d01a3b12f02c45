//! The message dispatcher: parses incoming chat lines, enforces badge and
//! format gates, and invokes the matched command.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use std::sync::Arc;

use tracing::{debug, error, info};

use streambot_common::traits::{
    AlertDispatcher, AliasRepository, ChatSink, CountsRepository, ListsRepository,
};
use streambot_common::{Badge, Command, CommandAction, Error, badge_check};

use crate::config::BotConfig;
use crate::services::builtin_commands::handle_builtin_command;
use crate::services::registry::build_registry;
use crate::services::substitution::substitute_variables;
use crate::services::timer_service::TimerService;

/// Tracks per-user alert spam timestamps. In-process only; not a distributed
/// rate limiter.
#[derive(Debug, Default)]
pub(crate) struct CooldownTracker {
    last_use: HashMap<String, Instant>,
}

pub struct CommandService {
    pub(crate) config: BotConfig,
    pub(crate) counts: Arc<dyn CountsRepository + Send + Sync>,
    pub(crate) lists: Arc<dyn ListsRepository + Send + Sync>,
    pub(crate) alerts: Arc<dyn AlertDispatcher + Send + Sync>,
    pub(crate) aliases: Arc<dyn AliasRepository + Send + Sync>,
    pub(crate) timers: Arc<TimerService>,
    sink: Arc<dyn ChatSink + Send + Sync>,
    cooldowns: Mutex<CooldownTracker>,
}

impl CommandService {
    pub fn new(
        config: BotConfig,
        counts: Arc<dyn CountsRepository + Send + Sync>,
        lists: Arc<dyn ListsRepository + Send + Sync>,
        alerts: Arc<dyn AlertDispatcher + Send + Sync>,
        aliases: Arc<dyn AliasRepository + Send + Sync>,
        timers: Arc<TimerService>,
        sink: Arc<dyn ChatSink + Send + Sync>,
    ) -> Self {
        debug!("initializing CommandService for bot '{}'", config.bot_name);
        Self {
            config,
            counts,
            lists,
            alerts,
            aliases,
            timers,
            sink,
            cooldowns: Mutex::new(CooldownTracker::default()),
        }
    }

    /// Entry point for any transport to feed a line of chat. Non-command text
    /// is ignored; dispatch errors are logged, never raised to the consumer
    /// loop.
    pub async fn receive_message(&self, user: &str, text: &str, badges: &[Badge]) {
        info!("{} (badges: {:?}) messaged: {}", user, badges, text);
        if !text.trim().starts_with('!') {
            return;
        }
        if let Err(e) = self.dispatch(text, user, badges, false).await {
            error!("command '{}' from {} failed: {}", text, user, e);
        }
    }

    /// Parses and runs a command line. `ignore_badges` is reserved for alias
    /// redirection (already gated once) and timer-fired commands (the bot
    /// acting with its own identity).
    pub async fn dispatch(
        &self,
        text: &str,
        user: &str,
        badges: &[Badge],
        ignore_badges: bool,
    ) -> Result<(), Error> {
        let mut text = text.trim().to_string();
        let mut ignore_badges = ignore_badges;

        // Alias actions rewrite the command line and loop back through the
        // full pipeline. Aliases only ever target builtins, so this settles
        // after at most one redirect.
        loop {
            let registry = self.build_registry().await?;
            let (name, remainder) = split_command(&text);

            let Some(command) = registry.get(name) else {
                self.say(&format!("Unknown command: {}", name), Some(user)).await?;
                return Ok(());
            };

            if !ignore_badges && !badge_check(badges, command.required_badge) {
                debug!(
                    "{} lacks badge '{}' for '{}'",
                    user, command.required_badge, command.name
                );
                return Ok(());
            }

            if !command.format.matches(remainder) {
                self.say(&format!("Format: {}", command.help), Some(user)).await?;
                return Ok(());
            }

            if let CommandAction::Alias { target } = &command.action {
                text = format!("{} {}", target, remainder).trim().to_string();
                ignore_badges = true;
                continue;
            }

            let lines =
                handle_builtin_command(self, &command.action, &registry, remainder, user, badges)
                    .await?;
            for line in lines {
                self.say(&line, Some(user)).await?;
            }
            return Ok(());
        }
    }

    /// Sends one line of chat through variable substitution to the sink.
    pub(crate) async fn say(&self, message: &str, user: Option<&str>) -> Result<(), Error> {
        let message =
            substitute_variables(message, user, self.counts.as_ref(), self.lists.as_ref()).await;
        self.sink.send(&message).await
    }

    /// Always-fresh policy: the table is rebuilt from storage before every
    /// dispatch, never cached across calls.
    async fn build_registry(&self) -> Result<HashMap<String, Command>, Error> {
        let alias_rows = self.aliases.list().await?;
        Ok(build_registry(&alias_rows))
    }

    /// Forces a rebuild after external writes to alias/timer storage. The
    /// per-dispatch rebuild makes this implicit; exposed for explicit
    /// cache-busting and startup validation.
    pub async fn refresh_registry(&self) -> Result<usize, Error> {
        let registry = self.build_registry().await?;
        debug!("registry refreshed: {} commands", registry.len());
        Ok(registry.len())
    }

    /// True when the user triggered an alert within the cooldown window.
    /// Always stamps the current attempt.
    pub(crate) fn spamming(&self, user: &str) -> bool {
        let mut tracker = self.cooldowns.lock().unwrap();
        let now = Instant::now();
        let spamming = tracker
            .last_use
            .get(user)
            .is_some_and(|last| now.duration_since(*last).as_secs() < self.config.spam_cooldown_seconds);
        tracker.last_use.insert(user.to_string(), now);
        spamming
    }
}

fn split_command(text: &str) -> (&str, &str) {
    let text = text.trim();
    let text = text.strip_prefix('!').unwrap_or(text);
    match text.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (text, ""),
    }
}
