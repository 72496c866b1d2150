//! Fixed-window counter record.

use std::time::Duration;

use tokio::time::Instant;

/// Requests counted for one key inside its current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRecord {
    /// Requests admitted in this window, including the first.
    pub count: u32,
    /// Instant at which the window closes.
    pub window_reset_at: Instant,
}

impl RateLimitRecord {
    /// A fresh window opened at `now` with one request counted.
    pub fn open(now: Instant, window: Duration) -> Self {
        Self {
            count: 1,
            window_reset_at: now + window,
        }
    }

    /// Whether the window has closed at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.window_reset_at
    }

    /// Whether the record has been expired for longer than `grace`.
    pub fn is_stale(&self, now: Instant, grace: Duration) -> bool {
        now >= self.window_reset_at + grace
    }

    /// Time left until the window closes.
    pub fn time_to_reset(&self, now: Instant) -> Duration {
        self.window_reset_at.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_lifecycle() {
        let start = Instant::now();
        let record = RateLimitRecord::open(start, Duration::from_secs(60));
        assert_eq!(record.count, 1);
        assert!(!record.is_expired(start));
        assert_eq!(record.time_to_reset(start), Duration::from_secs(60));

        let later = start + Duration::from_secs(60);
        assert!(record.is_expired(later));
        assert!(!record.is_stale(later, Duration::from_secs(30)));
        assert!(record.is_stale(later + Duration::from_secs(30), Duration::from_secs(30)));
        assert_eq!(record.time_to_reset(later), Duration::ZERO);
    }
}
