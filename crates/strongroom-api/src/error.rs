//! Maps delivery failures to HTTP responses.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::error;

use strongroom_core::AppError;
use strongroom_core::error::ErrorKind;
use strongroom_service::DeliveryFailure;

use crate::dto::response::ErrorBody;
use crate::headers::apply_private_headers;

/// A failure ready to be written to the client.
#[derive(Debug)]
pub struct ApiError {
    failure: DeliveryFailure,
    development_mode: bool,
}

impl ApiError {
    /// Wraps `failure`. Internal detail is only exposed when
    /// `development_mode` is set.
    pub fn new(failure: DeliveryFailure, development_mode: bool) -> Self {
        Self {
            failure,
            development_mode,
        }
    }

    /// The JSON body for this failure.
    pub fn body(&self) -> ErrorBody {
        let kind = self.failure.error.kind;
        let decision = self.failure.decision;
        ErrorBody {
            ok: false,
            error: kind.public_message().to_string(),
            error_code: kind.error_code().to_string(),
            reason: decision.map(|d| d.reason_code().as_str().to_string()),
            required_tier: decision.map(|d| d.required_tier()),
            current_tier: decision.map(|d| d.current_tier()),
            retry_after: self.failure.retry_after.map(|d| retry_after_seconds(d.as_millis())),
            detail: self
                .development_mode
                .then(|| self.failure.error.message.clone()),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::new(err.into(), false)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.failure.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() && self.failure.error.kind == ErrorKind::Internal {
            error!(error = %self.failure.error, "Internal server error");
        }

        let body = self.body();
        let mut response = (status, Json(body.clone())).into_response();
        let headers = response.headers_mut();
        apply_private_headers(headers);

        if self.failure.error.kind == ErrorKind::MethodNotAllowed {
            headers.insert(header::ALLOW, HeaderValue::from_static("GET"));
        }
        if let Some(seconds) = body.retry_after {
            headers.insert(header::RETRY_AFTER, HeaderValue::from(seconds));
        }

        response
    }
}

/// Whole seconds, rounded up, never below one.
fn retry_after_seconds(millis: u128) -> u64 {
    let seconds = millis.div_ceil(1000).max(1);
    u64::try_from(seconds).unwrap_or(u64::MAX)
}
