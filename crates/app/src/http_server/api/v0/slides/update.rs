use axum::extract::{Json, State};
use axum::response::IntoResponse;
use common::model::{normalize_tags, SlideId, SlidePatch};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::{SlideResponse, SlidesError};
use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

/// Fields left out are kept as they are.
#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct UpdateRequest {
    /// Slide id
    pub id: SlideId,

    #[arg(long)]
    #[serde(default)]
    pub title: Option<String>,

    #[arg(long)]
    #[serde(default)]
    pub description: Option<String>,

    /// Replace all tags; may be repeated
    #[arg(long = "tag")]
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    /// Point the slide at a new link
    #[arg(long)]
    #[serde(default)]
    pub url: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<UpdateRequest>,
) -> Result<impl IntoResponse, SlidesError> {
    let patch = SlidePatch {
        title: req.title,
        description: req.description,
        tags: req.tags.map(normalize_tags),
        url: req.url,
    };
    let slide = state.catalog().update_slide(&caller.session, req.id, patch)?;
    tracing::info!(id = %slide.id, editor = %caller.session.username, "slide updated");
    Ok(Json(SlideResponse { slide }))
}

impl ApiRequest for UpdateRequest {
    type Response = SlideResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/slides/update")?;
        Ok(client.post(full_url).json(&self))
    }
}
