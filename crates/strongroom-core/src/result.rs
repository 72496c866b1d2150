//! Convenience result type alias for Strongroom.

use crate::error::AppError;

/// A specialized `Result` type for Strongroom operations.
pub type AppResult<T> = Result<T, AppError>;
