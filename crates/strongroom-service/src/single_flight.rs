//! Request coalescing for concurrent loads of the same key.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::debug;

use strongroom_core::AppResult;

type Flight = Shared<BoxFuture<'static, AppResult<Bytes>>>;

/// Deduplicates concurrent loads keyed by string.
///
/// While a load for a key is in progress, further callers for that key
/// await the same future and observe the identical result. The entry is
/// dropped as soon as the load settles, so a later call starts afresh.
/// Nothing is cached.
#[derive(Default)]
pub struct SingleFlight {
    flights: Mutex<HashMap<String, Flight>>,
}

impl std::fmt::Debug for SingleFlight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlight")
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

impl SingleFlight {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `key`, joining an in-progress load when there is one.
    /// `loader` is only invoked when no load for `key` is in progress.
    pub async fn fetch<F, Fut>(&self, key: &str, loader: F) -> AppResult<Bytes>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Bytes>> + Send + 'static,
    {
        let flight = {
            let mut flights = self.table();
            match flights.get(key) {
                Some(existing) => {
                    debug!(key, "Joining in-flight load");
                    existing.clone()
                }
                None => {
                    let flight = loader().boxed().shared();
                    flights.insert(key.to_string(), flight.clone());
                    flight
                }
            }
        };

        let result = flight.clone().await;

        let mut flights = self.table();
        if flights.get(key).is_some_and(|current| current.ptr_eq(&flight)) {
            flights.remove(key);
        }

        result
    }

    /// Number of keys currently loading.
    pub fn in_flight(&self) -> usize {
        self.table().len()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, Flight>> {
        self.flights
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
