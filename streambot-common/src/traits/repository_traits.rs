// streambot-common/src/traits/repository_traits.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::models::alias::Alias;
use crate::models::list::ListSelector;
use crate::models::timer::Timer;

/// Persisted named counters.
#[async_trait]
pub trait CountsRepository: Send + Sync {
    /// `None` when no counter by that name exists.
    async fn get(&self, name: &str) -> Result<Option<i64>, Error>;
    /// Increments, creating at zero first if absent. Returns the new value.
    async fn add(&self, name: &str) -> Result<i64, Error>;
    async fn subtract(&self, name: &str) -> Result<i64, Error>;
    async fn set(&self, name: &str, value: i64) -> Result<i64, Error>;
    async fn reset(&self, name: &str) -> Result<i64, Error>;
    /// Copies `from` onto `to`; `Error::NotFound` when `from` is absent.
    async fn copy(&self, from: &str, to: &str) -> Result<i64, Error>;
    async fn remove(&self, name: &str) -> Result<(), Error>;
    async fn list(&self) -> Result<Vec<String>, Error>;
}

/// Persisted named lists of text items, with a per-list round-robin cursor.
#[async_trait]
pub trait ListsRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<String>, Error>;
    /// Resolves one item; the returned index is 1-based. `Next` advances and
    /// persists the list's cursor.
    async fn get_item(&self, name: &str, selector: ListSelector) -> Result<(String, usize), Error>;
    async fn size(&self, name: &str) -> Result<usize, Error>;
    /// Appends items, creating the list if absent.
    async fn add(&self, name: &str, items: &[String]) -> Result<(), Error>;
    /// Removes the item at a 1-based index, returning it.
    async fn remove_at(&self, name: &str, index: i64) -> Result<(String, usize), Error>;
    async fn remove(&self, name: &str) -> Result<(), Error>;
    async fn get_all(&self, name: &str) -> Result<Vec<String>, Error>;
    async fn set_all(&self, name: &str, items: Vec<String>) -> Result<(), Error>;
}

/// Persisted alias rows, consumed read-only by the command registry.
#[async_trait]
pub trait AliasRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Alias>, Error>;
    async fn add(&self, alias: &Alias) -> Result<(), Error>;
    async fn remove(&self, alias_name: &str) -> Result<(), Error>;
}

/// Persisted timer rows, read each scheduler cycle.
#[async_trait]
pub trait TimerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Timer>, Error>;
    async fn get(&self, timer_id: Uuid) -> Result<Option<Timer>, Error>;
    async fn upsert(&self, timer: &Timer) -> Result<(), Error>;
    async fn delete(&self, timer_id: Uuid) -> Result<(), Error>;
}
