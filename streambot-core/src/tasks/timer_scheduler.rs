//! Cron-driven timer execution. One task owns the whole lifecycle: it sleeps
//! until the soonest `next_run`, wakes early whenever timer storage changes,
//! and re-enters the dispatcher with the stored command line.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use cron::Schedule;
use tokio::sync::{Notify, watch};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use streambot_common::traits::TimerRepository;
use streambot_common::{Error, Timer};

use crate::services::CommandService;

pub struct TimerScheduler {
    repo: Arc<dyn TimerRepository + Send + Sync>,
    dispatcher: Arc<CommandService>,
    wake: Arc<Notify>,
    tz: Tz,
    shutdown_rx: watch::Receiver<bool>,
}

impl TimerScheduler {
    pub fn new(
        repo: Arc<dyn TimerRepository + Send + Sync>,
        dispatcher: Arc<CommandService>,
        wake: Arc<Notify>,
        tz: Tz,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            repo,
            dispatcher,
            wake,
            tz,
            shutdown_rx,
        }
    }

    pub async fn run(mut self) {
        info!("timer scheduler started (tz={})", self.tz);

        // Startup pass reconciles without firing, so a backlog that matured
        // while the process was down never floods chat.
        let mut next = match self.run_cycle(false).await {
            Ok(next) => next,
            Err(e) => {
                error!("timer reconciliation failed: {}", e);
                None
            }
        };

        loop {
            tokio::select! {
                changed = self.shutdown_rx.changed() => {
                    // a dropped sender means the host is gone; stop too
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        info!("timer scheduler shutting down");
                        return;
                    }
                    continue;
                }
                _ = self.wake.notified() => {
                    debug!("timer storage changed, recomputing schedule");
                }
                _ = wait_until(next) => {}
            }

            next = match self.run_cycle(true).await {
                Ok(next) => next,
                Err(e) => {
                    error!("timer cycle failed: {}", e);
                    None
                }
            };
        }
    }

    /// One wake of the scheduler: refresh the persisted view, process every
    /// due timer (firing its command only when `fire` is set), and return the
    /// soonest upcoming `next_run`, if any. A timer that matured several
    /// times since the last cycle fires once; missed intervals are not
    /// backfilled.
    pub async fn run_cycle(&self, fire: bool) -> Result<Option<DateTime<Utc>>, Error> {
        let now = Utc::now();
        let mut due: BinaryHeap<Reverse<(DateTime<Utc>, Uuid)>> = BinaryHeap::new();
        let mut soonest: Option<DateTime<Utc>> = None;

        for timer in self.repo.list().await? {
            if !timer.active {
                continue;
            }
            match timer.next_run {
                // freshly added row, give it its first occurrence
                None => {
                    let next = self.schedule_forward(timer, now).await?;
                    soonest = earliest(soonest, next);
                }
                Some(at) if at <= now => due.push(Reverse((at, timer.timer_id))),
                Some(at) => soonest = earliest(soonest, Some(at)),
            }
        }

        while let Some(Reverse((_, timer_id))) = due.pop() {
            let Some(timer) = self.repo.get(timer_id).await? else {
                continue;
            };
            if fire {
                info!("timer {} firing '{}'", timer.timer_id, timer.command);
                if let Err(e) = self
                    .dispatcher
                    .dispatch(&timer.command, &timer.bot_name, &[], true)
                    .await
                {
                    error!("timer command '{}' failed: {}", timer.command, e);
                }
            } else {
                debug!(
                    "timer {} was due while stopped, rescheduling without firing",
                    timer_id
                );
            }

            if timer.repeat {
                let next = self.schedule_forward(timer, Utc::now()).await?;
                soonest = earliest(soonest, next);
            } else {
                self.repo.delete(timer_id).await?;
            }
        }

        Ok(soonest)
    }

    /// Persists the timer's next occurrence after `after`. A timer with no
    /// further occurrences, or an unparseable cron expression, is removed.
    async fn schedule_forward(
        &self,
        mut timer: Timer,
        after: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, Error> {
        match next_occurrence(&timer.cron, after, self.tz) {
            Ok(Some(next)) => {
                timer.next_run = Some(next);
                self.repo.upsert(&timer).await?;
                Ok(Some(next))
            }
            Ok(None) => {
                debug!("timer {} has no further occurrences, removing", timer.timer_id);
                self.repo.delete(timer.timer_id).await?;
                Ok(None)
            }
            Err(e) => {
                warn!(
                    "timer {} has bad cron '{}' ({}), removing",
                    timer.timer_id, timer.cron, e
                );
                self.repo.delete(timer.timer_id).await?;
                Ok(None)
            }
        }
    }
}

async fn wait_until(deadline: Option<DateTime<Utc>>) {
    match deadline {
        Some(at) => {
            let wait = (at - Utc::now()).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;
        }
        // nothing scheduled, sleep until a storage write wakes us
        None => std::future::pending().await,
    }
}

fn earliest(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Computes the next occurrence of a five-field cron expression after the
/// given instant, evaluated in `tz` and returned in UTC.
pub fn next_occurrence(
    expr: &str,
    after: DateTime<Utc>,
    tz: Tz,
) -> Result<Option<DateTime<Utc>>, Error> {
    let normalized = normalize_cron(expr);
    let schedule = Schedule::from_str(&normalized)
        .map_err(|e| Error::Cron(format!("'{}': {}", expr, e)))?;
    let local = after.with_timezone(&tz);
    Ok(schedule.after(&local).next().map(|dt| dt.with_timezone(&Utc)))
}

/// Timer rows store classic five-field expressions; the schedule parser wants
/// a seconds field, so five fields get a literal zero prepended.
fn normalize_cron(expr: &str) -> String {
    if expr.split_whitespace().count() == 5 {
        format!("0 {}", expr)
    } else {
        expr.to_string()
    }
}
