//! Credentials → access context.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error};

use strongroom_core::{AppError, AppResult};
use strongroom_core::error::ErrorKind;
use strongroom_entity::AccessContext;

use super::store::{Credentials, SessionStore};

/// Turns raw request credentials into an [`AccessContext`].
///
/// Missing, unknown and expired sessions resolve to the anonymous context.
/// Only a failing store surfaces as an error, always as a server error.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    store: Arc<dyn SessionStore>,
}

impl SessionResolver {
    /// Creates a resolver over `store`.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Resolves `credentials` to a context.
    pub async fn resolve(&self, credentials: &Credentials) -> AppResult<AccessContext> {
        if credentials.token().is_none() {
            return Ok(AccessContext::anonymous());
        }

        let session = self.store.get_session(credentials).await.map_err(|e| {
            error!(error = %e, "Session store lookup failed");
            match e.kind {
                ErrorKind::Session => e,
                _ => AppError::session(format!("Session lookup failed: {}", e.message)),
            }
        })?;

        let Some(session) = session else {
            debug!("No session for presented credentials");
            return Ok(AccessContext::anonymous());
        };

        if session.is_expired_at(Utc::now()) {
            debug!(member_id = %session.member_id, "Session expired");
            return Ok(AccessContext::anonymous());
        }

        let mut ctx = AccessContext::authenticated(session.tier)
            .with_member_id(session.member_id)
            .with_internal(session.is_internal)
            .with_private_override(session.allow_private);
        if let Some(hash) = session.email_hash {
            ctx = ctx.with_email_hash(hash);
        }
        Ok(ctx)
    }
}
