//! `ClientMeta` extractor: client address, user agent and referrer.
//!
//! Proxy address headers are honoured only when
//! `server.trust_proxy_headers` is set; they are caller-controlled otherwise.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};

use strongroom_service::ClientInfo;

use crate::state::AppState;

/// Proxy headers consulted for the client address, in priority order.
const ADDRESS_HEADERS: [&str; 5] = [
    "x-forwarded-for",
    "x-real-ip",
    "x-client-ip",
    "cf-connecting-ip",
    "fastly-client-ip",
];

/// Transport metadata for the current request.
#[derive(Debug, Clone)]
pub struct ClientMeta(pub ClientInfo);

impl FromRequestParts<AppState> for ClientMeta {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(ClientMeta(client_info(
            parts,
            state.config.server.trust_proxy_headers,
        )))
    }
}

/// Resolve the client address: proxy headers (when trusted), then the
/// socket peer, then `"unknown"`.
fn client_info(parts: &Parts, trust_proxy: bool) -> ClientInfo {
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let forwarded = if trust_proxy {
        header_address(&parts.headers)
    } else {
        None
    };

    ClientInfo {
        ip: forwarded.or(peer).unwrap_or_else(|| "unknown".to_string()),
        user_agent: header_text(&parts.headers, header::USER_AGENT.as_str()),
        referrer: header_text(&parts.headers, header::REFERER.as_str()),
    }
}

/// First non-empty address from the proxy headers. For `x-forwarded-for`
/// only the first hop counts.
fn header_address(headers: &HeaderMap) -> Option<String> {
    ADDRESS_HEADERS.iter().find_map(|name| {
        header_text(headers, name)
            .and_then(|v| v.split(',').next().map(|hop| hop.trim().to_string()))
            .filter(|hop| !hop.is_empty())
    })
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
