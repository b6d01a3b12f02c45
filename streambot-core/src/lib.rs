// streambot-core/src/lib.rs

pub mod bot;
pub mod config;
pub mod repositories;
pub mod services;
pub mod tasks;
pub mod test_utils;

pub use bot::StreamBot;
pub use config::BotConfig;
pub use streambot_common::Error;
