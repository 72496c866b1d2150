//! Fixed-window rate limiting keyed by caller identity.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use strongroom_core::config::rate_limit::RateLimitConfig;
use strongroom_entity::RateLimitRecord;

/// Counts requests per key inside fixed windows.
///
/// Each key owns one record; the dashmap entry lock makes the
/// read-modify-write of a single key atomic. No I/O happens under a lock.
#[derive(Debug)]
pub struct RateLimiter {
    name: &'static str,
    records: DashMap<String, RateLimitRecord>,
    window: Duration,
    max_requests: u32,
    grace: Duration,
}

impl RateLimiter {
    /// Creates a limiter from configuration. `name` labels log lines.
    pub fn new(name: &'static str, config: &RateLimitConfig) -> Self {
        Self::with_limits(name, config.window(), config.max_requests, config.grace())
    }

    /// Creates a limiter with explicit limits.
    pub fn with_limits(
        name: &'static str,
        window: Duration,
        max_requests: u32,
        grace: Duration,
    ) -> Self {
        Self {
            name,
            records: DashMap::new(),
            window,
            max_requests,
            grace,
        }
    }

    /// Counts one request for `key` and reports whether it is admitted.
    pub fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        match self.records.entry(key.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(RateLimitRecord::open(now, self.window));
                true
            }
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                if record.is_expired(now) {
                    *record = RateLimitRecord::open(now, self.window);
                    true
                } else if record.count < self.max_requests {
                    record.count += 1;
                    true
                } else {
                    debug!(limiter = self.name, "Rate limit exceeded");
                    false
                }
            }
        }
    }

    /// Requests still admitted for `key` in its current window.
    pub fn remaining(&self, key: &str) -> u32 {
        let now = Instant::now();
        self.records
            .get(key)
            .filter(|r| !r.is_expired(now))
            .map_or(self.max_requests, |r| self.max_requests.saturating_sub(r.count))
    }

    /// Time until the current window for `key` closes. Zero when no window
    /// is open.
    pub fn retry_after(&self, key: &str) -> Duration {
        let now = Instant::now();
        self.records
            .get(key)
            .map_or(Duration::ZERO, |r| r.time_to_reset(now))
    }

    /// Removes records expired for longer than the grace period. Returns the
    /// number removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.records.retain(|_, record| {
            let keep = !record.is_stale(now, self.grace);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Runs [`RateLimiter::sweep`] every `interval` until `shutdown` flips
    /// to `true` or its sender is dropped.
    pub fn spawn_sweeper(
        self: &Arc<Self>,
        interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                tokio::select! {
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        let removed = limiter.sweep();
                        if removed > 0 {
                            debug!(limiter = limiter.name, removed, "Swept expired rate-limit records");
                        }
                    }
                }
            }

            info!(limiter = limiter.name, "Rate-limit sweeper stopped");
        })
    }
}
