use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tokio::time::timeout;

use super::data_source::*;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct Readiness {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog: Option<Backing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl Readiness {
    fn failure(message: &'static str) -> Response {
        let body = Self {
            status: "failure",
            catalog: None,
            message: Some(message),
        };
        (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
    }
}

#[tracing::instrument(level = "debug")]
pub async fn handler(data_src: StateDataSource) -> Response {
    let result = match timeout(HEALTH_CHECK_TIMEOUT, data_src.is_ready()).await {
        Ok(result) => result,
        Err(_) => return Readiness::failure("health check timed out"),
    };

    match result {
        Ok(backing) => {
            let body = Readiness {
                status: "ok",
                catalog: Some(backing),
                message: None,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(DataSourceError::DependencyFailure) => {
            Readiness::failure("catalog document is not available")
        }
        Err(DataSourceError::ShuttingDown) => Readiness::failure("service is shutting down"),
    }
}
