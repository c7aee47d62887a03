use axum::routing::post;
use axum::Router;

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod slides;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/auth", auth::router(state.clone()))
        .nest("/slides", slides::router(state.clone()))
        .nest("/admin", admin::router(state.clone()))
        .route("/dashboard", post(dashboard::handler))
        .with_state(state)
}
