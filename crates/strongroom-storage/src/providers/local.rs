//! Local filesystem asset store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, warn};

use strongroom_core::error::{AppError, ErrorKind};
use strongroom_core::result::AppResult;
use strongroom_core::traits::AssetStore;

/// Read-only store over a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    /// Root directory for all assets.
    root: PathBuf,
}

impl LocalAssetStore {
    /// Create a store rooted at the given path. The directory is not created.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root: root_path.into(),
        }
    }

    /// The configured root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path to an absolute path within the root.
    ///
    /// Only plain path segments are accepted; absolute paths, `..` and
    /// prefixes are refused.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path);
        let confined = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !confined {
            warn!(path, "Refused asset path outside the store root");
            return Err(AppError::invalid_input(format!(
                "Asset path escapes store root: {path}"
            )));
        }
        Ok(self.root.join(relative))
    }

    /// Reject files whose real location, after following symlinks, lies
    /// outside the root.
    async fn ensure_inside_root(&self, full_path: &Path, path: &str) -> AppResult<()> {
        let (Ok(real_root), Ok(real_path)) = (
            fs::canonicalize(&self.root).await,
            fs::canonicalize(full_path).await,
        ) else {
            return Ok(());
        };
        if real_path.starts_with(&real_root) {
            Ok(())
        } else {
            warn!(path, "Asset resolves outside the store root");
            Err(AppError::invalid_input(format!(
                "Asset path escapes store root: {path}"
            )))
        }
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn stat(&self, path: &str) -> AppResult<Option<u64>> {
        let full_path = self.resolve(path)?;
        match fs::metadata(&full_path).await {
            Ok(meta) if meta.is_file() => {
                self.ensure_inside_root(&full_path, path).await?;
                Ok(Some(meta.len()))
            }
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to get metadata: {path}"),
                e,
            )),
        }
    }

    async fn read_all(&self, path: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(path)?;
        self.ensure_inside_root(&full_path, path).await?;
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::asset_missing(format!("File not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {path}"),
                    e,
                )
            }
        })?;
        debug!(path, bytes = data.len(), "Read asset");
        Ok(Bytes::from(data))
    }
}
