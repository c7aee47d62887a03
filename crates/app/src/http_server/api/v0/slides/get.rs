use axum::extract::{Json, State};
use axum::response::IntoResponse;
use common::dashboard;
use common::links::Embed;
use common::model::{SlideId, SlideRecord};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::SlidesError;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct GetRequest {
    /// Slide id
    pub id: SlideId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetResponse {
    pub slide: SlideRecord,
    pub embed: Option<Embed>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<GetRequest>,
) -> Result<impl IntoResponse, SlidesError> {
    let slide = state.catalog().get_slide(&caller.session, req.id)?;
    let embed = dashboard::preview(&slide);
    Ok(Json(GetResponse { slide, embed }))
}

impl ApiRequest for GetRequest {
    type Response = GetResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/slides/get")?;
        Ok(client.post(full_url).json(&self))
    }
}
