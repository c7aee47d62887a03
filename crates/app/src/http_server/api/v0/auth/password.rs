use axum::extract::{Json, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct PasswordRequest {
    /// Current password
    #[arg(long, env = "SLIDES_PASSWORD", hide_env_values = true)]
    pub current: String,

    /// New password
    #[arg(long = "new")]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResponse {
    pub username: String,
}

/// Change the caller's own password. Other sessions of the same user stay
/// valid; this one does too.
pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<PasswordRequest>,
) -> Result<impl IntoResponse, AuthError> {
    state
        .catalog()
        .change_password(&caller.session, &req.current, &req.new_password)?;

    Ok(Json(PasswordResponse {
        username: caller.session.username,
    }))
}

impl ApiRequest for PasswordRequest {
    type Response = PasswordResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/auth/password")?;
        Ok(client.post(full_url).json(&self))
    }
}
