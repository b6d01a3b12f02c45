//! Write path for timer storage. Every mutation signals the scheduler's wake
//! handle so a sleeping scheduler recomputes immediately instead of waiting
//! out a stale long sleep.

use std::sync::Arc;

use tokio::sync::Notify;
use uuid::Uuid;

use streambot_common::traits::TimerRepository;
use streambot_common::{Error, Timer};

pub struct TimerService {
    repo: Arc<dyn TimerRepository + Send + Sync>,
    wake: Arc<Notify>,
}

impl TimerService {
    pub fn new(repo: Arc<dyn TimerRepository + Send + Sync>) -> Self {
        Self {
            repo,
            wake: Arc::new(Notify::new()),
        }
    }

    /// Wake signal for the scheduler task. `notify_one` stores a permit, so a
    /// write that lands while the scheduler is mid-cycle is never missed.
    pub fn wake_handle(&self) -> Arc<Notify> {
        self.wake.clone()
    }

    pub async fn list(&self) -> Result<Vec<Timer>, Error> {
        self.repo.list().await
    }

    pub async fn add(&self, timer: Timer) -> Result<(), Error> {
        self.repo.upsert(&timer).await?;
        self.wake.notify_one();
        Ok(())
    }

    pub async fn remove(&self, timer_id: Uuid) -> Result<(), Error> {
        self.repo.delete(timer_id).await?;
        self.wake.notify_one();
        Ok(())
    }
}
