use axum::extract::{Json, State};
use axum::response::IntoResponse;
use common::links;
use common::model::{normalize_tags, NewSlide};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::{SlideResponse, SlidesError};
use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct CreateRequest {
    /// Presentation link (Google Slides, Canva, SlideShare, ...)
    #[arg(long)]
    pub url: String,

    /// Title; derived from the link when omitted
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, default_value = "")]
    #[serde(default)]
    pub description: String,

    /// Tag, may be repeated
    #[arg(long = "tag")]
    #[serde(default)]
    pub tags: Vec<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<CreateRequest>,
) -> Result<impl IntoResponse, SlidesError> {
    let source = links::classify(&req.url)?;
    let slide = state.catalog().create_slide(
        &caller.session,
        NewSlide {
            title: req.title,
            description: req.description,
            tags: normalize_tags(&req.tags),
            source,
        },
    )?;

    tracing::info!(id = %slide.id, kind = %slide.kind(), owner = %slide.owner, "slide created");
    Ok((http::StatusCode::CREATED, Json(SlideResponse { slide })))
}

impl ApiRequest for CreateRequest {
    type Response = SlideResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/slides/create")?;
        Ok(client.post(full_url).json(&self))
    }
}
