use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::error::CatalogError;

/// Status code a catalog failure is reported with.
pub fn catalog_status(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::SlideNotFound(_) | CatalogError::UserNotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Forbidden(_) => StatusCode::FORBIDDEN,
        CatalogError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
        CatalogError::AlreadyExists(_) => StatusCode::CONFLICT,
        CatalogError::PasswordHash(_) | CatalogError::Io(_) | CatalogError::Json(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// JSON error body shared by every API endpoint: `{"msg": "..."}`.
/// Server side failures are logged and reported without detail.
pub fn error_response(status: StatusCode, msg: impl ToString) -> Response {
    let msg = if status.is_server_error() {
        tracing::error!(status = %status, error = %msg.to_string(), "request failed");
        "internal error".to_string()
    } else {
        msg.to_string()
    };
    (status, Json(serde_json::json!({ "msg": msg }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::SlideId;

    #[test]
    fn test_catalog_status_mapping() {
        assert_eq!(
            catalog_status(&CatalogError::SlideNotFound(SlideId(4))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            catalog_status(&CatalogError::Forbidden("no".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            catalog_status(&CatalogError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            catalog_status(&CatalogError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            catalog_status(&CatalogError::AlreadyExists("bob".into())),
            StatusCode::CONFLICT
        );
    }
}
