use std::str::FromStr;

use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use common::model::Role;
use serde::Deserialize;
use tracing::instrument;

use super::{format_timestamp, Nav, PageError};
use crate::http_server::auth::PageSession;
use crate::ServiceState;

const ACTIVITY_SHOWN: usize = 100;

#[derive(Template)]
#[template(path = "pages/admin.html")]
pub struct AdminTemplate {
    pub nav: Option<Nav>,
    pub users: Vec<UserRow>,
    pub activity: Vec<ActivityRow>,
}

#[derive(Debug, Clone)]
pub struct UserRow {
    pub username: String,
    pub role: String,
    pub created: String,
    pub is_self: bool,
}

#[derive(Debug, Clone)]
pub struct ActivityRow {
    pub at: String,
    pub actor: String,
    pub kind: String,
    pub subject: String,
}

#[instrument(skip(state, caller))]
pub async fn page(
    State(state): State<ServiceState>,
    caller: PageSession,
) -> Result<askama_axum::Response, PageError> {
    let session = &caller.session;
    let users = state
        .catalog()
        .list_users(session)?
        .into_iter()
        .map(|u| UserRow {
            is_self: u.username == session.username,
            role: u.role.to_string(),
            created: format_timestamp(u.created_at),
            username: u.username,
        })
        .collect();
    let activity = state
        .catalog()
        .view_activity_log(session, ACTIVITY_SHOWN)?
        .into_iter()
        .map(|e| ActivityRow {
            at: format_timestamp(e.at),
            actor: e.actor,
            kind: e.kind.to_string(),
            subject: e.subject,
        })
        .collect();

    let template = AdminTemplate {
        nav: Some(Nav::from(session)),
        users,
        activity,
    };
    Ok(template.into_response())
}

#[derive(Debug, Deserialize)]
pub struct AddUserForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: String,
}

pub async fn add_user(
    State(state): State<ServiceState>,
    caller: PageSession,
    Form(form): Form<AddUserForm>,
) -> Result<Redirect, PageError> {
    let role = if form.role.trim().is_empty() {
        Role::Member
    } else {
        Role::from_str(&form.role).map_err(PageError::Form)?
    };
    state
        .catalog()
        .add_user(&caller.session, &form.username, &form.password, role)?;
    Ok(Redirect::to("/admin"))
}

pub async fn remove_user(
    State(state): State<ServiceState>,
    caller: PageSession,
    Path(username): Path<String>,
) -> Result<Redirect, PageError> {
    let removed = state.catalog().remove_user(&caller.session, &username)?;
    state.sessions().revoke_user(&removed.username);
    Ok(Redirect::to("/admin"))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordForm {
    pub password: String,
}

pub async fn reset_password(
    State(state): State<ServiceState>,
    caller: PageSession,
    Path(username): Path<String>,
    Form(form): Form<ResetPasswordForm>,
) -> Result<Redirect, PageError> {
    let user = state
        .catalog()
        .reset_password(&caller.session, &username, &form.password)?;
    if user.username != caller.session.username {
        state.sessions().revoke_user(&user.username);
    }
    Ok(Redirect::to("/admin"))
}
