// streambot-common/src/traits/mod.rs

pub mod platform_traits;
pub mod repository_traits;

pub use platform_traits::{AlertDispatcher, ChatSink};
pub use repository_traits::{
    AliasRepository, CountsRepository, ListsRepository, TimerRepository,
};
