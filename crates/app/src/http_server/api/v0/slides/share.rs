use axum::extract::{Json, State};
use axum::response::IntoResponse;
use common::model::SlideId;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::{SlideResponse, SlidesError};
use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

/// Replaces the whole sharing list; pass no users to unshare.
#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct ShareRequest {
    /// Slide id
    pub id: SlideId,

    /// User to share with, may be repeated
    #[arg(long = "user")]
    #[serde(default)]
    pub users: Vec<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<ShareRequest>,
) -> Result<impl IntoResponse, SlidesError> {
    let slide = state
        .catalog()
        .set_sharing(&caller.session, req.id, req.users)?;
    tracing::info!(id = %slide.id, shared_with = ?slide.shared_with, "sharing updated");
    Ok(Json(SlideResponse { slide }))
}

impl ApiRequest for ShareRequest {
    type Response = SlideResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/slides/share")?;
        Ok(client.post(full_url).json(&self))
    }
}
