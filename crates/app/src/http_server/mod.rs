use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Router};
use rust_embed::RustEmbed;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse};
use tower_http::LatencyUnit;

pub mod api;
pub mod auth;
mod config;
mod handlers;
mod health;
mod html;

pub use config::Config;

use crate::ServiceState;

const API_PREFIX: &str = "/api";
const STATUS_PREFIX: &str = "/_status";

#[derive(RustEmbed)]
#[folder = "static"]
struct StaticAssets;

async fn static_handler(uri: Uri) -> Response {
    let path = uri
        .path()
        .trim_start_matches('/')
        .trim_start_matches("static/");

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.to_string())],
                content.data.into_owned(),
            )
                .into_response()
        }
        // Serve 404.html if file not found
        None => match StaticAssets::get("404.html") {
            Some(content) => (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/html".to_string())],
                content.data.into_owned(),
            )
                .into_response(),
            None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        },
    }
}

/// The full app: health probes, JSON API, HTML pages and static assets.
pub fn router(config: Config, state: ServiceState) -> Router {
    let log_level = config.log_level;
    let trace_layer = TraceLayer::new_for_http()
        .on_response(
            DefaultOnResponse::new()
                .include_headers(false)
                .level(log_level)
                .latency_unit(LatencyUnit::Micros),
        )
        .on_failure(DefaultOnFailure::new().latency_unit(LatencyUnit::Micros));

    Router::new()
        .nest(STATUS_PREFIX, health::router(state.clone()))
        .nest(API_PREFIX, api::router(state.clone()))
        .route("/static/*path", get(static_handler))
        .merge(html::router(state.clone()))
        .fallback(handlers::not_found_handler)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(Extension(config))
        .with_state(state)
        .layer(trace_layer)
}

/// Run the App HTTP server (UI + API on one port).
pub async fn run_app(
    config: Config,
    state: ServiceState,
    mut shutdown_rx: watch::Receiver<()>,
) -> Result<(), HttpServerError> {
    let listen_addr = config.listen_addr;
    tracing::info!("Static files embedded in binary");
    let router = router(config, state);

    tracing::info!(addr = ?listen_addr, "App server listening");
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await?;

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error("an error occurred running the HTTP server: {0}")]
    ServingFailed(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::time::Duration;

    use common::catalog::Catalog;

    use super::*;
    use crate::sessions::SessionStore;
    use crate::uploads::Uploads;

    #[tokio::test]
    async fn test_run_app_stops_on_shutdown_signal() {
        let temp = tempfile::TempDir::new().unwrap();
        let uploads = Uploads::open(temp.path()).await.unwrap();
        let state = ServiceState::new(
            Catalog::in_memory(),
            SessionStore::new(Duration::from_secs(60)),
            uploads,
        );
        let config = Config::new(SocketAddr::from(([127, 0, 0, 1], 0)), 1024);

        let (shutdown_tx, shutdown_rx) = watch::channel(());
        let server = tokio::spawn(run_app(config, state, shutdown_rx));
        shutdown_tx.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
