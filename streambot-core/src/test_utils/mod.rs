//! Shared fakes for unit and integration tests: a chat sink that collects
//! outbound lines, a canned alert dispatcher, and a harness wiring a full
//! dispatcher over the in-memory repositories.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use streambot_common::Error;
use streambot_common::traits::{AlertDispatcher, ChatSink};

use crate::config::BotConfig;
use crate::repositories::{
    InMemoryAliasRepository, InMemoryCountsRepository, InMemoryListsRepository,
    InMemoryTimerRepository,
};
use crate::services::{CommandService, TimerService};

/// Installs a tracing subscriber honoring `RUST_LOG`. Safe to call from every
/// test; only the first call wins.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Chat sink that records every line instead of sending it anywhere.
#[derive(Default)]
pub struct CollectingSink {
    sent: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<String> {
        self.sent.lock().await.clone()
    }

    pub async fn last(&self) -> Option<String> {
        self.sent.lock().await.last().cloned()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl ChatSink for CollectingSink {
    async fn send(&self, text: &str) -> Result<(), Error> {
        self.sent.lock().await.push(text.to_string());
        Ok(())
    }
}

/// Alert dispatcher backed by canned alert and tag tables. Records every
/// trigger so tests can assert on what fired.
#[derive(Default)]
pub struct FakeAlertDispatcher {
    alerts: Mutex<HashMap<String, String>>,
    tags: Mutex<HashMap<String, Vec<String>>>,
    triggered: Mutex<Vec<String>>,
}

impl FakeAlertDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_alert(self, name: &str, display_text: &str) -> Self {
        self.alerts
            .lock()
            .await
            .insert(name.to_string(), display_text.to_string());
        self
    }

    pub async fn with_tag(self, tag: &str, alert_names: &[&str]) -> Self {
        self.tags.lock().await.insert(
            tag.to_string(),
            alert_names.iter().map(|n| n.to_string()).collect(),
        );
        self
    }

    pub async fn triggered(&self) -> Vec<String> {
        self.triggered.lock().await.clone()
    }
}

#[async_trait]
impl AlertDispatcher for FakeAlertDispatcher {
    async fn trigger(&self, name: &str, chat_override: Option<&str>) -> Result<String, Error> {
        let alerts = self.alerts.lock().await;
        let stored = alerts
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("alert '{}'", name)))?;
        let display = chat_override.unwrap_or(stored).to_string();
        self.triggered.lock().await.push(name.to_string());
        Ok(display)
    }

    async fn trigger_tag(&self, tag: &str, chat_override: Option<&str>) -> Result<String, Error> {
        let tags = self.tags.lock().await;
        let members = tags
            .get(tag)
            .filter(|members| !members.is_empty())
            .ok_or_else(|| Error::NotFound(format!("tag '{}'", tag)))?;
        let name = members[0].clone();
        drop(tags);
        self.trigger(&name, chat_override).await
    }

    async fn tag_exists(&self, tag: &str) -> Result<bool, Error> {
        Ok(self.tags.lock().await.contains_key(tag))
    }
}

/// A full dispatcher over in-memory storage, with the concrete fakes exposed
/// for seeding and assertions.
pub struct TestHarness {
    pub service: Arc<CommandService>,
    pub counts: Arc<InMemoryCountsRepository>,
    pub lists: Arc<InMemoryListsRepository>,
    pub aliases: Arc<InMemoryAliasRepository>,
    pub timer_repo: Arc<InMemoryTimerRepository>,
    pub timers: Arc<TimerService>,
    pub alerts: Arc<FakeAlertDispatcher>,
    pub sink: Arc<CollectingSink>,
    pub config: BotConfig,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_alerts(FakeAlertDispatcher::new())
    }

    pub fn with_alerts(alerts: FakeAlertDispatcher) -> Self {
        init_test_logging();
        let config = BotConfig::default();
        let counts = Arc::new(InMemoryCountsRepository::new());
        let lists = Arc::new(InMemoryListsRepository::new());
        let aliases = Arc::new(InMemoryAliasRepository::new());
        let timer_repo = Arc::new(InMemoryTimerRepository::new());
        let timers = Arc::new(TimerService::new(timer_repo.clone()));
        let alerts = Arc::new(alerts);
        let sink = Arc::new(CollectingSink::new());

        let service = Arc::new(CommandService::new(
            config.clone(),
            counts.clone(),
            lists.clone(),
            alerts.clone(),
            aliases.clone(),
            timers.clone(),
            sink.clone(),
        ));

        Self {
            service,
            counts,
            lists,
            aliases,
            timer_repo,
            timers,
            alerts,
            sink,
            config,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
