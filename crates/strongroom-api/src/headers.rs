//! Response headers attached to every private document response.

use axum::http::{HeaderMap, HeaderName, HeaderValue, header};

/// Forbids caching, sniffing, framing and referrer leakage.
const PRIVATE_HEADERS: [(HeaderName, &str); 7] = [
    (
        header::CACHE_CONTROL,
        "no-store, no-cache, must-revalidate, proxy-revalidate, max-age=0",
    ),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::CONTENT_SECURITY_POLICY, "frame-ancestors 'none'"),
    (header::REFERRER_POLICY, "no-referrer"),
];

/// Non-standard header carrying the SHA-256 hex of the body.
pub const X_CONTENT_SHA256: HeaderName = HeaderName::from_static("x-content-sha256");

/// Inserts the private-response headers into `headers`.
pub fn apply_private_headers(headers: &mut HeaderMap) {
    for (name, value) in PRIVATE_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}
