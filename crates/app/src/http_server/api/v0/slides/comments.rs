use axum::extract::{Json, State};
use axum::response::IntoResponse;
use common::model::{Comment, SlideId};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::SlidesError;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct CommentsRequest {
    /// Slide id
    pub id: SlideId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<CommentsRequest>,
) -> Result<impl IntoResponse, SlidesError> {
    let comments = state.catalog().list_comments(&caller.session, req.id)?;
    Ok(Json(CommentsResponse { comments }))
}

impl ApiRequest for CommentsRequest {
    type Response = CommentsResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/slides/comments")?;
        Ok(client.post(full_url).json(&self))
    }
}
