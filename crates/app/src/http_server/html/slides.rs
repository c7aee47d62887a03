use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Multipart, Path, State};
use axum::response::Redirect;
use axum::Form;
use common::auth::Action;
use common::dashboard;
use common::links::{self, Embed};
use common::model::{parse_tags, NewSlide, SlideId, SlidePatch, SlideSource};
use serde::Deserialize;
use tracing::instrument;

use super::{format_timestamp, non_blank, Nav, PageError};
use crate::http_server::api::v0::slides::UploadForm;
use crate::http_server::auth::PageSession;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "pages/slide.html")]
pub struct SlideTemplate {
    pub nav: Option<Nav>,
    pub id: u64,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub tags_field: String,
    pub kind: String,
    pub owner: String,
    pub created: String,
    pub modified: String,
    pub url: Option<String>,
    pub file_name: Option<String>,
    pub embed: Option<Embed>,
    pub shared_with: String,
    pub comments: Vec<CommentView>,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_share: bool,
}

#[derive(Debug, Clone)]
pub struct CommentView {
    pub author: String,
    pub text: String,
    pub created: String,
}

#[instrument(skip(state, caller))]
pub async fn detail(
    State(state): State<ServiceState>,
    caller: PageSession,
    Path(id): Path<SlideId>,
) -> Result<askama_axum::Response, PageError> {
    let session = &caller.session;
    let slide = state.catalog().get_slide(session, id)?;
    let comments = state
        .catalog()
        .list_comments(session, id)?
        .into_iter()
        .map(|c| CommentView {
            author: c.author,
            text: c.text,
            created: format_timestamp(c.created_at),
        })
        .collect();

    let file_name = match &slide.source {
        SlideSource::File { file_name, .. } => Some(file_name.clone()),
        _ => None,
    };

    let template = SlideTemplate {
        nav: Some(Nav::from(session)),
        id: slide.id.0,
        description: slide.description.clone(),
        tags_field: slide.tags.join(", "),
        tags: slide.tags.clone(),
        kind: slide.kind().label().to_string(),
        owner: slide.owner.clone(),
        created: format_timestamp(slide.created_at),
        modified: format_timestamp(slide.modified_at),
        url: slide.source.url().map(str::to_string),
        file_name,
        embed: dashboard::preview(&slide),
        shared_with: slide.shared_with.join(", "),
        comments,
        can_edit: session.can(Action::EditSlide(&slide)),
        can_delete: session.can(Action::DeleteSlide(&slide)),
        can_share: session.can(Action::ShareSlide(&slide)),
        title: slide.title,
    };
    Ok(template.into_response())
}

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
}

pub async fn create(
    State(state): State<ServiceState>,
    caller: PageSession,
    Form(form): Form<CreateForm>,
) -> Result<Redirect, PageError> {
    let source = links::classify(&form.url)?;
    let slide = state.catalog().create_slide(
        &caller.session,
        NewSlide {
            title: non_blank(form.title),
            description: form.description,
            tags: parse_tags(&form.tags),
            source,
        },
    )?;
    Ok(Redirect::to(&format!("/slides/{}", slide.id)))
}

pub async fn upload(
    State(state): State<ServiceState>,
    caller: PageSession,
    multipart: Multipart,
) -> Result<Redirect, PageError> {
    let form = UploadForm::read(multipart).await?;
    let slide = form.save(&state, &caller.session).await?;
    Ok(Redirect::to(&format!("/slides/{}", slide.id)))
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    /// Blank keeps the current link.
    #[serde(default)]
    pub url: Option<String>,
}

pub async fn edit(
    State(state): State<ServiceState>,
    caller: PageSession,
    Path(id): Path<SlideId>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, PageError> {
    let patch = SlidePatch {
        title: Some(form.title),
        description: Some(form.description),
        tags: Some(parse_tags(&form.tags)),
        url: non_blank(form.url),
    };
    state.catalog().update_slide(&caller.session, id, patch)?;
    Ok(Redirect::to(&format!("/slides/{id}")))
}

pub async fn delete(
    State(state): State<ServiceState>,
    caller: PageSession,
    Path(id): Path<SlideId>,
) -> Result<Redirect, PageError> {
    let deleted = state.catalog().delete_slide(&caller.session, id)?;
    if let Some(stored_name) = deleted.source.stored_name() {
        if let Err(e) = state.uploads().remove(stored_name).await {
            tracing::warn!(id = %deleted.id, stored_name, error = %e, "failed to remove upload");
        }
    }
    Ok(Redirect::to("/"))
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

pub async fn comment(
    State(state): State<ServiceState>,
    caller: PageSession,
    Path(id): Path<SlideId>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, PageError> {
    state.catalog().add_comment(&caller.session, id, &form.text)?;
    Ok(Redirect::to(&format!("/slides/{id}#comments")))
}

#[derive(Debug, Deserialize)]
pub struct SharingForm {
    /// Usernames separated by commas or whitespace.
    #[serde(default)]
    pub users: String,
}

pub async fn share(
    State(state): State<ServiceState>,
    caller: PageSession,
    Path(id): Path<SlideId>,
    Form(form): Form<SharingForm>,
) -> Result<Redirect, PageError> {
    let users = split_usernames(&form.users);
    state.catalog().set_sharing(&caller.session, id, users)?;
    Ok(Redirect::to(&format!("/slides/{id}")))
}

fn split_usernames(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_usernames() {
        assert_eq!(split_usernames("alice, bob\ncarol"), vec!["alice", "bob", "carol"]);
        assert!(split_usernames(" , ").is_empty());
    }
}
