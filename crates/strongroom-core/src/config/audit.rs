//! Audit sink configuration.

use serde::{Deserialize, Serialize};

/// Where audit events and download counters are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Backend: `"postgres"` or `"memory"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Capacity of the background audit queue. Events beyond it are dropped.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_backend() -> String {
    "postgres".to_string()
}

fn default_queue_capacity() -> usize {
    1024
}
