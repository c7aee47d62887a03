use std::str::FromStr;

use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Query, State};
use axum::response::Redirect;
use common::catalog::SlideFilter;
use common::dashboard::{DashboardStats, SlideSummary};
use common::links::Embed;
use common::model::SlideKind;
use serde::Deserialize;
use tracing::instrument;

use super::{format_timestamp, non_blank, Nav, PageError};
use crate::http_server::auth::PageSession;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardTemplate {
    pub nav: Option<Nav>,
    pub stats: DashboardStats,
    pub cards: Vec<SlideCard>,
    pub filter: FilterQuery,
    pub filtered: bool,
}

/// One slide as shown in the dashboard grid.
#[derive(Debug, Clone)]
pub struct SlideCard {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub kind: String,
    pub owner: String,
    pub modified: String,
    pub comment_count: usize,
    pub shared: bool,
    pub embed: Option<Embed>,
    pub external_url: Option<String>,
}

impl From<SlideSummary> for SlideCard {
    fn from(summary: SlideSummary) -> Self {
        let slide = summary.slide;
        Self {
            id: slide.id.0,
            kind: slide.kind().label().to_string(),
            modified: format_timestamp(slide.modified_at),
            shared: !slide.shared_with.is_empty(),
            external_url: slide.source.url().map(str::to_string),
            title: slide.title,
            description: slide.description,
            tags: slide.tags,
            owner: slide.owner,
            comment_count: summary.comment_count,
            embed: summary.embed,
        }
    }
}

/// Filter fields of the dashboard form. Empty fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub kind: String,
}

impl FilterQuery {
    fn to_filter(&self) -> Result<SlideFilter, PageError> {
        let kind = non_blank(Some(self.kind.clone()))
            .map(|k| SlideKind::from_str(&k))
            .transpose()
            .map_err(PageError::Form)?;
        Ok(SlideFilter {
            tag: non_blank(Some(self.tag.clone())),
            title: non_blank(Some(self.title.clone())),
            owner: non_blank(Some(self.owner.clone())),
            kind,
            limit: None,
        })
    }

    fn is_active(&self) -> bool {
        [&self.tag, &self.title, &self.owner, &self.kind]
            .iter()
            .any(|v| !v.trim().is_empty())
    }
}

#[instrument(skip(state, caller))]
pub async fn handler(
    State(state): State<ServiceState>,
    caller: PageSession,
    Query(query): Query<FilterQuery>,
) -> Result<askama_axum::Response, PageError> {
    let filter = query.to_filter()?;
    let dashboard = state.catalog().dashboard(&caller.session, &filter);

    let template = DashboardTemplate {
        nav: Some(Nav::from(&caller.session)),
        stats: dashboard.stats,
        cards: dashboard.slides.into_iter().map(SlideCard::from).collect(),
        filtered: query.is_active(),
        filter: query,
    };
    Ok(template.into_response())
}

/// Drop the in-memory copy of the catalog and read it again from disk,
/// picking up edits made by another process.
pub async fn refresh(
    State(state): State<ServiceState>,
    caller: PageSession,
) -> Result<Redirect, PageError> {
    state.catalog().reload()?;
    tracing::info!(username = %caller.session.username, "catalog reloaded from disk");
    Ok(Redirect::to("/"))
}
