//! Fixed-window rate limit configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed-window limiter settings, shared by the IP and member limiters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
    /// Requests allowed per key per window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Interval between sweeps of expired records, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// How long an expired record survives before a sweep removes it, in seconds.
    #[serde(default = "default_grace")]
    pub grace_seconds: u64,
}

impl RateLimitConfig {
    /// Window length as a [`Duration`].
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }

    /// Sweep grace period as a [`Duration`].
    pub fn grace(&self) -> Duration {
        Duration::from_secs(self.grace_seconds)
    }

    /// Sweep interval as a [`Duration`].
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window(),
            max_requests: default_max_requests(),
            sweep_interval_seconds: default_sweep_interval(),
            grace_seconds: default_grace(),
        }
    }
}

fn default_window() -> u64 {
    60
}

fn default_max_requests() -> u32 {
    10
}

fn default_sweep_interval() -> u64 {
    30
}

fn default_grace() -> u64 {
    30
}
