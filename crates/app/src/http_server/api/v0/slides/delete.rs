use axum::extract::{Json, State};
use axum::response::IntoResponse;
use common::model::{SlideId, SlideRecord};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::SlidesError;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct DeleteRequest {
    /// Slide id
    pub id: SlideId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: SlideRecord,
}

/// Remove the slide, its comments and, for uploads, the stored file. The
/// record is gone once the catalog write succeeds; a file that cannot be
/// removed afterwards is only logged.
pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<DeleteRequest>,
) -> Result<impl IntoResponse, SlidesError> {
    let deleted = state.catalog().delete_slide(&caller.session, req.id)?;

    if let Some(stored_name) = deleted.source.stored_name() {
        if let Err(e) = state.uploads().remove(stored_name).await {
            tracing::warn!(id = %deleted.id, stored_name, error = %e, "failed to remove upload");
        }
    }

    tracing::info!(id = %deleted.id, by = %caller.session.username, "slide deleted");
    Ok(Json(DeleteResponse { deleted }))
}

impl ApiRequest for DeleteRequest {
    type Response = DeleteResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/slides/delete")?;
        Ok(client.post(full_url).json(&self))
    }
}
