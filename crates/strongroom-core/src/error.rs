//! Unified application error types for Strongroom.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Every [`ErrorKind`] maps onto exactly
//! one HTTP status and one wire-level error code, so the delivery pipeline
//! can audit a failure with the same status the client eventually sees.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Malformed input (bad slug, unparsable parameter).
    InvalidInput,
    /// The HTTP method is not the supported read method.
    MethodNotAllowed,
    /// A rate limit was exceeded.
    RateLimited,
    /// The requested document is unknown to the registry.
    NotFound,
    /// The document exists but is not served by the guarded path.
    NotApplicable,
    /// The caller has no valid session.
    SessionInvalid,
    /// The caller's tier or grants do not satisfy the document.
    AccessDenied,
    /// The document is registered but its asset is absent on disk.
    AssetMissing,
    /// The request deadline elapsed.
    Timeout,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A storage I/O error occurred.
    Storage,
    /// The session collaborator failed.
    Session,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl ErrorKind {
    /// HTTP status code for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::MethodNotAllowed => 405,
            Self::RateLimited => 429,
            Self::NotFound | Self::AssetMissing => 404,
            Self::NotApplicable | Self::AccessDenied => 403,
            Self::SessionInvalid => 401,
            Self::Timeout
            | Self::Internal
            | Self::Database
            | Self::Storage
            | Self::Session
            | Self::Configuration
            | Self::Serialization => 500,
        }
    }

    /// Wire-level error code returned to clients and written to audit events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput | Self::MethodNotAllowed => "invalid_input",
            Self::RateLimited => "rate_limited",
            Self::NotFound => "not_found",
            Self::NotApplicable => "not_applicable",
            Self::SessionInvalid => "session_invalid",
            Self::AccessDenied => "access_denied",
            Self::AssetMissing => "asset_missing",
            Self::Timeout => "timeout",
            Self::Internal
            | Self::Database
            | Self::Storage
            | Self::Session
            | Self::Configuration
            | Self::Serialization => "server_error",
        }
    }

    /// Client-facing message. Never includes internal detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid request",
            Self::MethodNotAllowed => "Method not allowed",
            Self::RateLimited => "Too many requests",
            Self::NotFound => "Document not found",
            Self::NotApplicable => "Not a private document",
            Self::SessionInvalid => "Session invalid or expired",
            Self::AccessDenied => "Insufficient permissions",
            Self::AssetMissing => "Document file not available",
            Self::Timeout => "Request timed out",
            Self::Internal
            | Self::Database
            | Self::Storage
            | Self::Session
            | Self::Configuration
            | Self::Serialization => "Server error",
        }
    }

    /// Whether this kind is a server-side fault rather than a caller outcome.
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "INVALID_INPUT"),
            Self::MethodNotAllowed => write!(f, "METHOD_NOT_ALLOWED"),
            Self::RateLimited => write!(f, "RATE_LIMITED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::NotApplicable => write!(f, "NOT_APPLICABLE"),
            Self::SessionInvalid => write!(f, "SESSION_INVALID"),
            Self::AccessDenied => write!(f, "ACCESS_DENIED"),
            Self::AssetMissing => write!(f, "ASSET_MISSING"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Session => write!(f, "SESSION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error used throughout Strongroom.
///
/// The `message` is internal detail: it is logged and, in development mode
/// only, echoed to the client. Production responses carry only
/// [`ErrorKind::public_message`].
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Create a method-not-allowed error.
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MethodNotAllowed, message)
    }

    /// Create a rate-limited error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a not-applicable error.
    pub fn not_applicable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotApplicable, message)
    }

    /// Create a session-invalid error.
    pub fn session_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SessionInvalid, message)
    }

    /// Create an access-denied error.
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccessDenied, message)
    }

    /// Create an asset-missing error.
    pub fn asset_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AssetMissing, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a session collaborator error.
    pub fn session(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Session, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Wire-level error code for this error.
    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
