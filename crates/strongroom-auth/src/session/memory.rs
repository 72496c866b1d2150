//! In-memory session store for tests and local runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use strongroom_core::{AppError, AppResult};

use super::store::{Credentials, Session, SessionStore};

/// Token → session map.
///
/// Can be switched into an outage mode in which every lookup fails, to
/// exercise the error path of callers.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<DashMap<String, Session>>,
    unavailable: Arc<AtomicBool>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `session` under `token`.
    pub fn insert(&self, token: impl Into<String>, session: Session) {
        self.sessions.insert(token.into(), session);
    }

    /// Toggles outage mode.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_session(&self, credentials: &Credentials) -> AppResult<Option<Session>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::session("Session store unavailable"));
        }
        Ok(credentials
            .token()
            .and_then(|token| self.sessions.get(token).map(|entry| entry.value().clone())))
    }
}
