//! `SessionCredentials` extractor: bearer token and session cookie.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::extract::CookieJar;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use strongroom_auth::Credentials;

use crate::state::AppState;

/// Session credentials presented with the request. Missing or malformed
/// credentials yield empty fields; the resolver treats them as anonymous.
#[derive(Debug, Clone)]
pub struct SessionCredentials(pub Credentials);

impl FromRequestParts<AppState> for SessionCredentials {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer_token =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .ok()
                .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());

        let jar = CookieJar::from_headers(&parts.headers);
        let session_cookie = jar
            .get(&state.config.auth.session_cookie)
            .map(|cookie| cookie.value().to_string());

        Ok(SessionCredentials(Credentials {
            bearer_token,
            session_cookie,
        }))
    }
}
