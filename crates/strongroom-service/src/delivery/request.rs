//! Inputs to one delivery attempt.

use strongroom_auth::Credentials;
use strongroom_core::types::sha256_hex;

/// Client metadata captured from the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// Best-effort client address; `"unknown"` when none could be found.
    pub ip: String,
    /// `User-Agent` header.
    pub user_agent: Option<String>,
    /// `Referer` header.
    pub referrer: Option<String>,
}

impl ClientInfo {
    /// Client metadata with just an address.
    pub fn from_ip(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            ..Self::default()
        }
    }

    /// Rate-limit key for the address.
    pub fn rate_limit_key(&self) -> String {
        format!("ip:{}", self.ip)
    }

    /// SHA-256 hex of the address, for audit records.
    pub fn ip_hash(&self) -> Option<String> {
        (!self.ip.is_empty()).then(|| sha256_hex(&self.ip))
    }
}

/// One request for a document.
#[derive(Debug, Clone)]
pub struct DeliveryRequest {
    /// HTTP method as received.
    pub method: String,
    /// Raw slug from the path, not yet validated.
    pub slug: String,
    /// Session credentials.
    pub credentials: Credentials,
    /// Transport metadata.
    pub client: ClientInfo,
}

impl DeliveryRequest {
    /// A `GET` for `slug` with no credentials.
    pub fn get(slug: impl Into<String>, client: ClientInfo) -> Self {
        Self {
            method: "GET".to_string(),
            slug: slug.into(),
            credentials: Credentials::none(),
            client,
        }
    }

    /// Attach credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }
}
