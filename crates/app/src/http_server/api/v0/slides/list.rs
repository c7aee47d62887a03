use axum::extract::{Json, State};
use axum::response::IntoResponse;
use common::catalog::SlideFilter;
use common::model::{SlideKind, SlideRecord};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub struct ListRequest {
    /// Only slides carrying this tag
    #[arg(long)]
    #[serde(default)]
    pub tag: Option<String>,

    /// Only slides whose title contains this text
    #[arg(long)]
    #[serde(default)]
    pub title: Option<String>,

    #[arg(long)]
    #[serde(default)]
    pub owner: Option<String>,

    /// google, link or file
    #[arg(long)]
    #[serde(default)]
    pub kind: Option<SlideKind>,

    #[arg(long)]
    #[serde(default)]
    pub limit: Option<usize>,
}

impl From<ListRequest> for SlideFilter {
    fn from(req: ListRequest) -> Self {
        SlideFilter {
            tag: req.tag,
            title: req.title,
            owner: req.owner,
            kind: req.kind,
            limit: req.limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub slides: Vec<SlideRecord>,
}

/// Slides visible to the caller, newest first.
pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<ListRequest>,
) -> impl IntoResponse {
    let filter = SlideFilter::from(req);
    let slides = state.catalog().list_slides(&caller.session, &filter);
    Json(ListResponse { slides })
}

impl ApiRequest for ListRequest {
    type Response = ListResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/slides/list")?;
        Ok(client.post(full_url).json(&self))
    }
}
