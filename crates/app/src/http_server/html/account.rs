use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::Form;
use serde::Deserialize;

use super::{format_timestamp, Nav, PageError};
use crate::http_server::auth::PageSession;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "pages/account.html")]
pub struct AccountTemplate {
    pub nav: Option<Nav>,
    pub username: String,
    pub role: String,
    pub created: String,
    pub notice: Option<String>,
}

fn render(state: &ServiceState, caller: &PageSession, notice: Option<String>) -> AccountTemplate {
    let created = state
        .catalog()
        .user_info(&caller.session.username)
        .map(|u| format_timestamp(u.created_at))
        .unwrap_or_default();

    AccountTemplate {
        nav: Some(Nav::from(&caller.session)),
        username: caller.session.username.clone(),
        role: caller.session.role.to_string(),
        created,
        notice,
    }
}

pub async fn page(State(state): State<ServiceState>, caller: PageSession) -> askama_axum::Response {
    render(&state, &caller, None).into_response()
}

#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub current: String,
    pub new_password: String,
    pub confirm: String,
}

pub async fn change_password(
    State(state): State<ServiceState>,
    caller: PageSession,
    Form(form): Form<PasswordForm>,
) -> Result<askama_axum::Response, PageError> {
    if form.new_password != form.confirm {
        return Err(PageError::Form("the new passwords do not match".to_string()));
    }
    state
        .catalog()
        .change_password(&caller.session, &form.current, &form.new_password)?;

    Ok(render(&state, &caller, Some("Password changed.".to_string())).into_response())
}
