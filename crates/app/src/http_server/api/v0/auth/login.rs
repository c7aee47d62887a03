use axum::extract::{Json, State};
use axum::response::IntoResponse;
use common::model::Role;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct LoginRequest {
    /// Account name
    #[arg(long, short)]
    pub username: String,

    /// Account password
    #[arg(long, env = "SLIDES_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub role: Role,
    pub expires_in_secs: u64,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    let session = state.catalog().authenticate(&req.username, &req.password)?;
    let token = state.sessions().issue(session.clone());
    tracing::info!(username = %session.username, role = %session.role, "api login");

    Ok((
        http::StatusCode::OK,
        Json(LoginResponse {
            token,
            username: session.username,
            role: session.role,
            expires_in_secs: state.sessions().ttl().as_secs(),
        }),
    ))
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/auth/login")?;
        Ok(client.post(full_url).json(&self))
    }
}
