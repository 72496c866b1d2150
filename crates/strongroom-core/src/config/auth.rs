//! Session token configuration.

use serde::{Deserialize, Serialize};

/// Placeholder secret shipped in `config/default.toml`.
pub const DEFAULT_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Session token verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Lifetime of issued session tokens in minutes.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
    /// Clock-skew leeway in seconds when checking expiry.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_minutes: default_session_ttl(),
            leeway_seconds: default_leeway(),
            session_cookie: default_cookie_name(),
        }
    }
}

impl AuthConfig {
    /// Whether the signing secret is still the shipped placeholder (or empty).
    pub fn uses_default_secret(&self) -> bool {
        let secret = self.jwt_secret.trim();
        secret.is_empty() || secret == DEFAULT_JWT_SECRET
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_session_ttl() -> u64 {
    60
}

fn default_leeway() -> u64 {
    5
}

fn default_cookie_name() -> String {
    "strongroom_session".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret_detection() {
        assert!(AuthConfig::default().uses_default_secret());

        let mut config = AuthConfig {
            jwt_secret: "  ".to_string(),
            ..AuthConfig::default()
        };
        assert!(config.uses_default_secret());

        config.jwt_secret = "a-real-deployment-secret".to_string();
        assert!(!config.uses_default_secret());
    }
}
