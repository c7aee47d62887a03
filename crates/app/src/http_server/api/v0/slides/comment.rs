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
pub struct CommentRequest {
    /// Slide id
    pub id: SlideId,

    /// Comment text
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub comment: Comment,
}

pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<CommentRequest>,
) -> Result<impl IntoResponse, SlidesError> {
    let comment = state
        .catalog()
        .add_comment(&caller.session, req.id, &req.text)?;
    Ok((http::StatusCode::CREATED, Json(CommentResponse { comment })))
}

impl ApiRequest for CommentRequest {
    type Response = CommentResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/slides/comment")?;
        Ok(client.post(full_url).json(&self))
    }
}
