use axum::extract::{Json, State};
use axum::response::IntoResponse;
use common::model::ActivityEntry;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::AdminError;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

const DEFAULT_LIMIT: usize = 50;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct ActivityRequest {
    /// Number of entries, newest first
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub entries: Vec<ActivityEntry>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<ActivityRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let entries = state
        .catalog()
        .view_activity_log(&caller.session, req.limit)?;
    Ok(Json(ActivityResponse { entries }))
}

impl ApiRequest for ActivityRequest {
    type Response = ActivityResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/admin/activity")?;
        Ok(client.post(full_url).json(&self))
    }
}
