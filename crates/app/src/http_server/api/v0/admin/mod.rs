use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use common::error::CatalogError;

use crate::http_server::api::{catalog_status, error_response};
use crate::ServiceState;

pub mod activity;
pub mod users;

pub use activity::{ActivityRequest, ActivityResponse};
pub use users::{
    AddUserRequest, ListUsersRequest, RemoveUserRequest, ResetPasswordRequest, UserResponse,
    UsersResponse,
};

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/users/list", post(users::list_handler))
        .route("/users/add", post(users::add_handler))
        .route("/users/remove", post(users::remove_handler))
        .route("/users/reset-password", post(users::reset_password_handler))
        .route("/activity", post(activity::handler))
        .with_state(state)
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        match self {
            AdminError::Catalog(e) => error_response(catalog_status(&e), e),
        }
    }
}
