//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use strongroom_core::AppError;
use strongroom_core::config::auth::AuthConfig;

use super::claims::SessionClaims;

/// Validates HS256 session tokens.
#[derive(Clone)]
pub struct SessionTokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for SessionTokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl SessionTokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Every failure is reported as [`strongroom_core::error::ErrorKind::SessionInvalid`];
    /// callers treat it as "no session".
    pub fn decode(&self, token: &str) -> Result<SessionClaims, AppError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::session_invalid("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::session_invalid("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::session_invalid("Invalid token signature")
                }
                _ => AppError::session_invalid(format!("Token validation failed: {e}")),
            })?;

        Ok(token_data.claims)
    }
}
