//! Response DTOs.

use serde::{Deserialize, Serialize};

use strongroom_entity::Tier;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub ok: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Liveness report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: u64,
    /// Number of registered documents.
    pub documents: usize,
    /// Whether the asset store root is reachable.
    pub storage_available: bool,
}

/// Failure body for the document endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Always `false`.
    pub ok: bool,
    /// Human-readable message.
    pub error: String,
    /// Machine-readable error code.
    pub error_code: String,
    /// Denial reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Tier the document asks for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_tier: Option<Tier>,
    /// Tier the caller was evaluated at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_tier: Option<Tier>,
    /// Seconds until a rate-limited caller may retry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    /// Internal detail, development mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
