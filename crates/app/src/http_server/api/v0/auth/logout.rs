use axum::extract::{Json, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub username: String,
}

pub async fn handler(State(state): State<ServiceState>, caller: ApiSession) -> impl IntoResponse {
    state.sessions().revoke(&caller.token);
    tracing::info!(username = %caller.session.username, "api logout");

    Json(LogoutResponse {
        username: caller.session.username,
    })
}

impl ApiRequest for LogoutRequest {
    type Response = LogoutResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/auth/logout")?;
        Ok(client.post(full_url).json(&self))
    }
}
