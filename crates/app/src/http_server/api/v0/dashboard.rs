use axum::extract::{Json, State};
use axum::response::IntoResponse;
use common::catalog::SlideFilter;
use common::dashboard::Dashboard;
use reqwest::{Client, RequestBuilder, Url};

use super::slides::ListRequest;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

/// Dashboard request: the same filters as `slides/list`.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, clap::Args)]
pub struct DashboardRequest {
    #[command(flatten)]
    #[serde(flatten)]
    pub filter: ListRequest,
}

pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<DashboardRequest>,
) -> impl IntoResponse {
    let filter = SlideFilter::from(req.filter);
    Json(state.catalog().dashboard(&caller.session, &filter))
}

impl ApiRequest for DashboardRequest {
    type Response = Dashboard;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/dashboard")?;
        Ok(client.post(full_url).json(&self))
    }
}
