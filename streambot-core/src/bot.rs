//! Top-level runtime wiring. `StreamBot::start` assembles the dispatcher,
//! spawns the message consumer and the timer scheduler, and hands back a
//! facade the host uses to feed chat and shut everything down.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use streambot_common::Error;
use streambot_common::traits::{
    AlertDispatcher, AliasRepository, ChatSink, CountsRepository, ListsRepository, TimerRepository,
};

use crate::config::BotConfig;
use crate::services::{CommandService, TimerService};
use crate::tasks::{IncomingMessage, TimerScheduler, spawn_message_consumer};

pub struct StreamBot {
    dispatcher: Arc<CommandService>,
    timers: Arc<TimerService>,
    message_tx: mpsc::UnboundedSender<IncomingMessage>,
    shutdown_tx: watch::Sender<bool>,
    consumer_handle: JoinHandle<()>,
    scheduler_handle: JoinHandle<()>,
}

impl StreamBot {
    #[allow(clippy::too_many_arguments)]
    pub fn start(
        config: BotConfig,
        counts: Arc<dyn CountsRepository + Send + Sync>,
        lists: Arc<dyn ListsRepository + Send + Sync>,
        alerts: Arc<dyn AlertDispatcher + Send + Sync>,
        aliases: Arc<dyn AliasRepository + Send + Sync>,
        timer_repo: Arc<dyn TimerRepository + Send + Sync>,
        sink: Arc<dyn ChatSink + Send + Sync>,
    ) -> Self {
        let tz = config.tz();
        let timers = Arc::new(TimerService::new(timer_repo.clone()));
        let dispatcher = Arc::new(CommandService::new(
            config,
            counts,
            lists,
            alerts,
            aliases,
            timers.clone(),
            sink,
        ));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        let consumer_handle =
            spawn_message_consumer(dispatcher.clone(), message_rx, shutdown_rx.clone());
        let scheduler = TimerScheduler::new(
            timer_repo,
            dispatcher.clone(),
            timers.wake_handle(),
            tz,
            shutdown_rx,
        );
        let scheduler_handle = tokio::spawn(scheduler.run());

        info!("stream bot started");
        Self {
            dispatcher,
            timers,
            message_tx,
            shutdown_tx,
            consumer_handle,
            scheduler_handle,
        }
    }

    /// Channel the transport pushes chat messages onto.
    pub fn message_sender(&self) -> mpsc::UnboundedSender<IncomingMessage> {
        self.message_tx.clone()
    }

    pub fn dispatcher(&self) -> Arc<CommandService> {
        self.dispatcher.clone()
    }

    pub fn timers(&self) -> Arc<TimerService> {
        self.timers.clone()
    }

    /// Rebuilds the command table, returning how many commands it holds.
    /// Useful at startup to surface alias rows that failed to resolve.
    pub async fn refresh_registry(&self) -> Result<usize, Error> {
        self.dispatcher.refresh_registry().await
    }

    /// Signals both background tasks and waits for them to exit.
    pub async fn shutdown(self) {
        info!("stream bot shutting down");
        let _ = self.shutdown_tx.send(true);
        let _ = self.consumer_handle.await;
        let _ = self.scheduler_handle.await;
    }
}
