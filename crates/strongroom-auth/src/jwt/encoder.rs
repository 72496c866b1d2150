//! Session token creation.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use strongroom_core::AppError;
use strongroom_core::config::auth::AuthConfig;

use super::claims::SessionClaims;
use crate::session::Session;

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct SessionTokenEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for SessionTokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenEncoder")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl SessionTokenEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: i64::try_from(config.session_ttl_minutes).unwrap_or(i64::MAX / 60),
        }
    }

    /// Issues a token for the given session.
    pub fn issue(&self, session: &Session) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.ttl_minutes);

        let claims = SessionClaims {
            sub: session.member_id.clone(),
            tier: session.tier,
            email_hash: session.email_hash.clone(),
            is_internal: session.is_internal,
            allow_private: session.allow_private,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        self.encode_claims(&claims)
    }

    /// Signs an explicit claims set.
    pub fn encode_claims(&self, claims: &SessionClaims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }
}
