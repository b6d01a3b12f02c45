// streambot-common/src/models/mod.rs

pub mod alias;
pub mod badge;
pub mod command;
pub mod list;
pub mod timer;

pub use alias::Alias;
pub use badge::Badge;
pub use command::{ArgToken, Command, CommandAction, CommandFormat, CommandGroup};
pub use list::ListSelector;
pub use timer::Timer;
