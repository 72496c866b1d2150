//! Asset store trait for read-only document storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Read-only access to delivered assets.
///
/// Paths are relative to the store root and are always computed by the
/// server from a validated slug. Implementations must still refuse paths
/// that escape the root.
#[async_trait]
pub trait AssetStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Size in bytes of the asset at `path`, or `None` when it does not exist.
    async fn stat(&self, path: &str) -> AppResult<Option<u64>>;

    /// Read the full content of the asset at `path`.
    async fn read_all(&self, path: &str) -> AppResult<Bytes>;
}
