//! Private document handler.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};

use strongroom_core::AppError;
use strongroom_service::{Delivery, DeliveryRequest};

use crate::error::ApiError;
use crate::extractors::{ClientMeta, SessionCredentials};
use crate::headers::{X_CONTENT_SHA256, apply_private_headers};
use crate::state::AppState;

/// ANY /api/private/documents/{slug}
///
/// Every method reaches the pipeline so that rejected methods are audited
/// like any other failure.
pub async fn get_document(
    State(state): State<AppState>,
    method: Method,
    Path(slug): Path<String>,
    ClientMeta(client): ClientMeta,
    SessionCredentials(credentials): SessionCredentials,
) -> Response {
    let request = DeliveryRequest {
        method: method.as_str().to_string(),
        slug,
        credentials,
        client,
    };

    match state.pipeline.deliver(request).await {
        Ok(delivery) => delivery_response(delivery)
            .unwrap_or_else(|e| ApiError::new(e.into(), state.development_mode()).into_response()),
        Err(failure) => ApiError::new(failure, state.development_mode()).into_response(),
    }
}

fn delivery_response(delivery: Delivery) -> Result<Response, AppError> {
    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &delivery.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            delivery.disposition.header_value(&delivery.file_name),
        )
        .header(header::CONTENT_LENGTH, delivery.bytes.len())
        .header(X_CONTENT_SHA256, &delivery.sha256)
        .body(Body::from(delivery.bytes))
        .map_err(|e| AppError::internal(format!("Failed to build response: {e}")))?;

    apply_private_headers(response.headers_mut());
    Ok(response)
}
