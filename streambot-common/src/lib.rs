// streambot-common/src/lib.rs

pub mod error;
pub mod models;
pub mod traits;

pub use error::Error;
pub use models::badge::{Badge, badge_check, max_badge, min_badge};
pub use models::command::{ArgToken, Command, CommandAction, CommandFormat, CommandGroup};
pub use models::alias::Alias;
pub use models::list::ListSelector;
pub use models::timer::Timer;
