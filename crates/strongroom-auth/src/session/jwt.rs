//! Session store backed by self-contained signed tokens.

use async_trait::async_trait;
use tracing::debug;

use strongroom_core::AppResult;
use strongroom_core::config::auth::AuthConfig;

use super::store::{Credentials, Session, SessionStore};
use crate::jwt::{SessionTokenDecoder, SessionTokenEncoder};

/// Validates HS256 session tokens locally. No remote calls are made, so this
/// store never reports an outage.
#[derive(Debug, Clone)]
pub struct JwtSessionStore {
    encoder: SessionTokenEncoder,
    decoder: SessionTokenDecoder,
}

impl JwtSessionStore {
    /// Creates a store from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoder: SessionTokenEncoder::new(config),
            decoder: SessionTokenDecoder::new(config),
        }
    }

    /// Issues a token that this store will accept for `session`.
    pub fn issue(&self, session: &Session) -> AppResult<String> {
        self.encoder.issue(session)
    }
}

#[async_trait]
impl SessionStore for JwtSessionStore {
    async fn get_session(&self, credentials: &Credentials) -> AppResult<Option<Session>> {
        let Some(token) = credentials.token() else {
            return Ok(None);
        };

        match self.decoder.decode(token) {
            Ok(claims) => {
                let expires_at = claims.expires_at();
                Ok(Some(Session {
                    member_id: claims.sub,
                    tier: claims.tier,
                    email_hash: claims.email_hash,
                    is_internal: claims.is_internal,
                    allow_private: claims.allow_private,
                    expires_at: Some(expires_at),
                }))
            }
            Err(e) => {
                debug!(error = %e.message, "Session token rejected");
                Ok(None)
            }
        }
    }
}
