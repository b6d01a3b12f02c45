// streambot-core/src/services/mod.rs

pub mod alias_resolver;
pub mod builtin_commands;
pub mod command_service;
pub mod registry;
pub mod substitution;
pub mod timer_service;

pub use command_service::CommandService;
pub use timer_service::TimerService;
