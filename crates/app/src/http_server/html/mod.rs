//! Server rendered pages. Every page but the login form needs a session
//! cookie; anonymous visitors are redirected to `/login`.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use common::auth::Session;
use common::error::CatalogError;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

mod account;
mod admin;
mod dashboard;
mod files;
mod login;
mod slides;

use crate::http_server::api::catalog_status;
use crate::http_server::api::v0::slides::SlidesError;
use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/login", get(login::page).post(login::submit))
        .route("/logout", get(login::logout).post(login::logout))
        .route("/", get(dashboard::handler))
        .route("/refresh", post(dashboard::refresh))
        .route("/slides", post(slides::create))
        .route("/slides/upload", post(slides::upload))
        .route("/slides/:id", get(slides::detail))
        .route("/slides/:id/edit", post(slides::edit))
        .route("/slides/:id/delete", post(slides::delete))
        .route("/slides/:id/comments", post(slides::comment))
        .route("/slides/:id/sharing", post(slides::share))
        .route("/files/:id", get(files::handler))
        .route("/account", get(account::page))
        .route("/account/password", post(account::change_password))
        .route("/admin", get(admin::page))
        .route("/admin/users", post(admin::add_user))
        .route("/admin/users/:username/remove", post(admin::remove_user))
        .route("/admin/users/:username/password", post(admin::reset_password))
        .with_state(state)
}

/// Who is logged in, for the navigation bar.
#[derive(Debug, Clone)]
pub struct Nav {
    pub username: String,
    pub is_admin: bool,
}

impl From<&Session> for Nav {
    fn from(session: &Session) -> Self {
        Self {
            username: session.username.clone(),
            is_admin: session.is_admin(),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/error.html")]
struct ErrorTemplate {
    nav: Option<Nav>,
    status: u16,
    reason: String,
    message: String,
}

/// Failure of a page handler, rendered as an HTML error page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Upload(#[from] SlidesError),
    #[error("{0}")]
    Form(String),
    #[error("file storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl PageError {
    fn status(&self) -> StatusCode {
        match self {
            PageError::Catalog(e) => catalog_status(e),
            PageError::Upload(e) => e.status(),
            PageError::Form(_) => StatusCode::BAD_REQUEST,
            PageError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "page request failed");
            "Something went wrong on our side. Try again later.".to_string()
        } else {
            self.to_string()
        };

        let page = ErrorTemplate {
            nav: None,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        };
        (status, page).into_response()
    }
}

pub(crate) fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.to_offset(UtcOffset::UTC)
        .format(format_description!("[year]-[month]-[day] [hour]:[minute] UTC"))
        .unwrap_or_else(|_| ts.to_string())
}

/// Blank form fields mean "not given".
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_format_timestamp_in_utc() {
        let ts = datetime!(2024-03-05 22:30 -2);
        assert_eq!(format_timestamp(ts), "2024-03-06 00:30 UTC");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some("x".into())), Some("x".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
