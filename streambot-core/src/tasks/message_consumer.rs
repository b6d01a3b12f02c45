//! Serialized intake of chat messages. Transports push onto an unbounded
//! channel; one consumer task feeds the dispatcher a message at a time, so
//! command side effects are never interleaved.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::info;

use streambot_common::Badge;

use crate::services::CommandService;

#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub user: String,
    pub text: String,
    pub badges: Vec<Badge>,
}

pub fn spawn_message_consumer(
    dispatcher: Arc<CommandService>,
    mut rx: mpsc::UnboundedReceiver<IncomingMessage>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!("message consumer started");
        loop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    // a dropped sender means the host is gone; stop too
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("message consumer shutting down");
                        return;
                    }
                }
                msg = rx.recv() => {
                    let Some(msg) = msg else {
                        info!("message channel closed, consumer exiting");
                        return;
                    };
                    dispatcher
                        .receive_message(&msg.user, &msg.text, &msg.badges)
                        .await;
                }
            }
        }
    })
}
