use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use common::error::CatalogError;
use serde::Deserialize;
use tracing::instrument;

use super::{Nav, PageError};
use crate::http_server::auth::{expired_session_cookie, session_cookie, SESSION_COOKIE};
use crate::ServiceState;

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub nav: Option<Nav>,
    pub username: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn page() -> askama_axum::Response {
    LoginTemplate {
        nav: None,
        username: String::new(),
        error: None,
    }
    .into_response()
}

#[instrument(skip_all)]
pub async fn submit(
    State(state): State<ServiceState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<askama_axum::Response, PageError> {
    match state.catalog().authenticate(&form.username, &form.password) {
        Ok(session) => {
            let token = state.sessions().issue(session);
            let max_age = state.sessions().ttl().as_secs() as i64;
            tracing::info!(username = %form.username, "page login");
            Ok((jar.add(session_cookie(token, max_age)), Redirect::to("/")).into_response())
        }
        Err(CatalogError::InvalidCredentials) => {
            let page = LoginTemplate {
                nav: None,
                username: form.username,
                error: Some("Invalid username or password.".to_string()),
            };
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(State(state): State<ServiceState>, jar: CookieJar) -> askama_axum::Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions().revoke(cookie.value());
    }
    (jar.remove(expired_session_cookie()), Redirect::to("/login")).into_response()
}
