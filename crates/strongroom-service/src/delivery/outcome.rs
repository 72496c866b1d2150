//! Results of one delivery attempt.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;

use strongroom_core::AppError;
use strongroom_entity::{Decision, ReasonCode};

/// How the client should present the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Display in the browser.
    Inline,
    /// Save as a download.
    Attachment,
}

impl Disposition {
    /// `Content-Disposition` header value for `file_name`.
    pub fn header_value(&self, file_name: &str) -> String {
        let safe: String = file_name
            .chars()
            .filter(|c| (c.is_ascii_graphic() && *c != '"' && *c != '\\') || *c == ' ')
            .collect();
        format!("{self}; filename=\"{safe}\"")
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline => write!(f, "inline"),
            Self::Attachment => write!(f, "attachment"),
        }
    }
}

/// A successfully fetched document, ready to be written to the client.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// Full document content.
    pub bytes: Bytes,
    /// MIME type.
    pub content_type: String,
    /// File name presented to the client.
    pub file_name: String,
    /// Presentation hint.
    pub disposition: Disposition,
    /// SHA-256 hex of `bytes`.
    pub sha256: String,
}

/// A delivery that ended without content.
#[derive(Debug, Clone)]
pub struct DeliveryFailure {
    /// Categorized cause; its kind fixes status and error code.
    pub error: AppError,
    /// The authorization decision, for denials.
    pub decision: Option<Decision>,
    /// Time until the caller may retry, for rate-limit rejections.
    pub retry_after: Option<Duration>,
}

impl DeliveryFailure {
    /// HTTP status for this failure.
    pub fn status_code(&self) -> u16 {
        self.error.status_code()
    }

    /// Wire-level error code.
    pub fn error_code(&self) -> &'static str {
        self.error.error_code()
    }

    /// Denial reason, when the failure is an authorization denial.
    pub fn reason(&self) -> Option<ReasonCode> {
        self.decision.map(|d| d.reason_code())
    }

    /// Rate-limit failure carrying a retry hint.
    pub fn rate_limited(error: AppError, retry_after: Duration) -> Self {
        Self {
            error,
            decision: None,
            retry_after: Some(retry_after),
        }
    }

    /// Authorization denial.
    pub fn denied(error: AppError, decision: Decision) -> Self {
        Self {
            error,
            decision: Some(decision),
            retry_after: None,
        }
    }
}

impl From<AppError> for DeliveryFailure {
    fn from(error: AppError) -> Self {
        Self {
            error,
            decision: None,
            retry_after: None,
        }
    }
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{} ({})", self.error, reason.as_str()),
            None => write!(f, "{}", self.error),
        }
    }
}
