//! Long-running background tasks spawned by the bot runtime.

pub mod message_consumer;
pub mod timer_scheduler;

pub use message_consumer::{IncomingMessage, spawn_message_consumer};
pub use timer_scheduler::TimerScheduler;
