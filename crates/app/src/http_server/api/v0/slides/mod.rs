use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use common::error::CatalogError;
use common::model::SlideRecord;
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::http_server::api::{catalog_status, error_response};
use crate::ServiceState;

pub mod comment;
pub mod comments;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod share;
pub mod update;
pub mod upload;

pub use comment::{CommentRequest, CommentResponse};
pub use comments::{CommentsRequest, CommentsResponse};
pub use create::CreateRequest;
pub use delete::{DeleteRequest, DeleteResponse};
pub use get::{GetRequest, GetResponse};
pub use list::{ListRequest, ListResponse};
pub use share::ShareRequest;
pub use update::UpdateRequest;
pub use upload::UploadForm;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/create", post(create::handler))
        .route("/upload", post(upload::handler))
        .route("/list", post(list::handler))
        .route("/get", post(get::handler))
        .route("/update", post(update::handler))
        .route("/delete", post(delete::handler))
        .route("/share", post(share::handler))
        .route("/comment", post(comment::handler))
        .route("/comments", post(comments::handler))
        .with_state(state)
}

/// Body returned by every call that yields a single, possibly changed, slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideResponse {
    pub slide: SlideRecord,
}

#[derive(Debug, thiserror::Error)]
pub enum SlidesError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),
    #[error("upload storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl SlidesError {
    pub fn status(&self) -> StatusCode {
        match self {
            SlidesError::Catalog(e) => catalog_status(e),
            SlidesError::InvalidRequest(_) | SlidesError::Multipart(_) => StatusCode::BAD_REQUEST,
            SlidesError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SlidesError {
    fn into_response(self) -> Response {
        error_response(self.status(), self)
    }
}
