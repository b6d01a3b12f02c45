// streambot-core/src/repositories/mod.rs

pub mod memory;

pub use memory::{
    InMemoryAliasRepository, InMemoryCountsRepository, InMemoryListsRepository,
    InMemoryTimerRepository,
};
