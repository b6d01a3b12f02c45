//! In-memory repository implementations.
//!
//! These back the test suite and single-process deployments that do not need
//! durable storage. Durable backends implement the same traits host-side.

use std::collections::HashMap;

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::Mutex;
use uuid::Uuid;

use streambot_common::traits::{
    AliasRepository, CountsRepository, ListsRepository, TimerRepository,
};
use streambot_common::{Alias, Error, ListSelector, Timer};

#[derive(Default)]
pub struct InMemoryCountsRepository {
    counts: Mutex<HashMap<String, i64>>,
}

impl InMemoryCountsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CountsRepository for InMemoryCountsRepository {
    async fn get(&self, name: &str) -> Result<Option<i64>, Error> {
        Ok(self.counts.lock().await.get(name).copied())
    }

    async fn add(&self, name: &str) -> Result<i64, Error> {
        let mut counts = self.counts.lock().await;
        let value = counts.entry(name.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }

    async fn subtract(&self, name: &str) -> Result<i64, Error> {
        let mut counts = self.counts.lock().await;
        let value = counts.entry(name.to_string()).or_insert(0);
        *value -= 1;
        Ok(*value)
    }

    async fn set(&self, name: &str, value: i64) -> Result<i64, Error> {
        self.counts.lock().await.insert(name.to_string(), value);
        Ok(value)
    }

    async fn reset(&self, name: &str) -> Result<i64, Error> {
        self.counts.lock().await.insert(name.to_string(), 0);
        Ok(0)
    }

    async fn copy(&self, from: &str, to: &str) -> Result<i64, Error> {
        let mut counts = self.counts.lock().await;
        let value = *counts
            .get(from)
            .ok_or_else(|| Error::NotFound(from.to_string()))?;
        counts.insert(to.to_string(), value);
        Ok(value)
    }

    async fn remove(&self, name: &str) -> Result<(), Error> {
        self.counts.lock().await.remove(name);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, Error> {
        let mut names: Vec<String> = self.counts.lock().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[derive(Default)]
struct StoredList {
    items: Vec<String>,
    /// Round-robin cursor for the `next` selector, 0-based.
    cursor: usize,
}

#[derive(Default)]
pub struct InMemoryListsRepository {
    lists: Mutex<HashMap<String, StoredList>>,
}

impl InMemoryListsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resolves a possibly negative 1-based index against a list length,
/// returning a 0-based position.
fn resolve_index(index: i64, len: usize) -> Result<usize, Error> {
    let len = len as i64;
    let pos = if index > 0 { index - 1 } else { len + index };
    if index == 0 || pos < 0 || pos >= len {
        return Err(Error::NotFound(format!("index {}", index)));
    }
    Ok(pos as usize)
}

#[async_trait]
impl ListsRepository for InMemoryListsRepository {
    async fn list(&self) -> Result<Vec<String>, Error> {
        let mut names: Vec<String> = self.lists.lock().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn get_item(&self, name: &str, selector: ListSelector) -> Result<(String, usize), Error> {
        let mut lists = self.lists.lock().await;
        let list = lists
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        if list.items.is_empty() {
            return Err(Error::NotFound(format!("{} is empty", name)));
        }
        let pos = match selector {
            ListSelector::Next => {
                let pos = list.cursor % list.items.len();
                list.cursor = pos + 1;
                pos
            }
            ListSelector::Random => rand::rng().random_range(0..list.items.len()),
            ListSelector::Index(i) => resolve_index(i, list.items.len())?,
        };
        Ok((list.items[pos].clone(), pos + 1))
    }

    async fn size(&self, name: &str) -> Result<usize, Error> {
        let lists = self.lists.lock().await;
        let list = lists
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        Ok(list.items.len())
    }

    async fn add(&self, name: &str, items: &[String]) -> Result<(), Error> {
        let mut lists = self.lists.lock().await;
        let list = lists.entry(name.to_string()).or_default();
        list.items.extend(items.iter().cloned());
        Ok(())
    }

    async fn remove_at(&self, name: &str, index: i64) -> Result<(String, usize), Error> {
        let mut lists = self.lists.lock().await;
        let list = lists
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        let pos = resolve_index(index, list.items.len())?;
        let item = list.items.remove(pos);
        Ok((item, pos + 1))
    }

    async fn remove(&self, name: &str) -> Result<(), Error> {
        self.lists.lock().await.remove(name);
        Ok(())
    }

    async fn get_all(&self, name: &str) -> Result<Vec<String>, Error> {
        let lists = self.lists.lock().await;
        Ok(lists.get(name).map(|l| l.items.clone()).unwrap_or_default())
    }

    async fn set_all(&self, name: &str, items: Vec<String>) -> Result<(), Error> {
        let mut lists = self.lists.lock().await;
        lists.insert(name.to_string(), StoredList { items, cursor: 0 });
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAliasRepository {
    aliases: Mutex<HashMap<String, Alias>>,
}

impl InMemoryAliasRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AliasRepository for InMemoryAliasRepository {
    async fn list(&self) -> Result<Vec<Alias>, Error> {
        let mut rows: Vec<Alias> = self.aliases.lock().await.values().cloned().collect();
        rows.sort_by(|a, b| a.alias.cmp(&b.alias));
        Ok(rows)
    }

    async fn add(&self, alias: &Alias) -> Result<(), Error> {
        self.aliases
            .lock()
            .await
            .insert(alias.alias.clone(), alias.clone());
        Ok(())
    }

    async fn remove(&self, alias_name: &str) -> Result<(), Error> {
        self.aliases.lock().await.remove(alias_name);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTimerRepository {
    timers: Mutex<HashMap<Uuid, Timer>>,
}

impl InMemoryTimerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimerRepository for InMemoryTimerRepository {
    async fn list(&self) -> Result<Vec<Timer>, Error> {
        let mut rows: Vec<Timer> = self.timers.lock().await.values().cloned().collect();
        rows.sort_by(|a, b| a.command.cmp(&b.command));
        Ok(rows)
    }

    async fn get(&self, timer_id: Uuid) -> Result<Option<Timer>, Error> {
        Ok(self.timers.lock().await.get(&timer_id).cloned())
    }

    async fn upsert(&self, timer: &Timer) -> Result<(), Error> {
        self.timers
            .lock()
            .await
            .insert(timer.timer_id, timer.clone());
        Ok(())
    }

    async fn delete(&self, timer_id: Uuid) -> Result<(), Error> {
        self.timers.lock().await.remove(&timer_id);
        Ok(())
    }
}
