use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use common::error::CatalogError;

use crate::http_server::api::{catalog_status, error_response};
use crate::ServiceState;

pub mod login;
pub mod logout;
pub mod password;

pub use login::{LoginRequest, LoginResponse};
pub use logout::{LogoutRequest, LogoutResponse};
pub use password::{PasswordRequest, PasswordResponse};

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/login", post(login::handler))
        .route("/logout", post(logout::handler))
        .route("/password", post(password::handler))
        .with_state(state)
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Catalog(e) => error_response(catalog_status(&e), e),
        }
    }
}
