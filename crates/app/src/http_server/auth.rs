//! Request extractors resolving the caller's [`Session`].
//!
//! The JSON API takes a bearer token, the HTML pages a session cookie.
//! Both look the token up in the same [`SessionStore`](crate::sessions::SessionStore).

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use common::auth::Session;

use crate::ServiceState;

pub const SESSION_COOKIE: &str = "slides_session";

/// Caller of a JSON endpoint, from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct ApiSession {
    pub session: Session,
    pub token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    #[error("missing bearer token")]
    MissingToken,
    #[error("session expired or unknown, log in again")]
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let msg = serde_json::json!({"msg": self.to_string()});
        (StatusCode::UNAUTHORIZED, Json(msg)).into_response()
    }
}

#[async_trait]
impl FromRequestParts<ServiceState> for ApiSession {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AuthRejection::MissingToken)?;

        let token = bearer.token().to_string();
        let session = state
            .sessions()
            .get(&token)
            .ok_or(AuthRejection::InvalidToken)?;
        Ok(Self { session, token })
    }
}

/// Caller of an HTML page, from the session cookie. Anonymous visitors
/// are sent to the login page.
#[derive(Debug, Clone)]
pub struct PageSession {
    pub session: Session,
    pub token: String,
}

pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

#[async_trait]
impl FromRequestParts<ServiceState> for PageSession {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(LoginRedirect)?;
        let session = state.sessions().get(&token).ok_or(LoginRedirect)?;
        Ok(Self { session, token })
    }
}

pub fn session_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
