//! User administration. Every call here requires an admin session; the
//! catalog enforces it.

use axum::extract::{Json, State};
use axum::response::IntoResponse;
use common::model::{Role, UserInfo};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::AdminError;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub struct ListUsersRequest {}

pub async fn list_handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(_req): Json<ListUsersRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let users = state.catalog().list_users(&caller.session)?;
    Ok(Json(UsersResponse { users }))
}

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct AddUserRequest {
    pub username: String,

    /// Initial password
    #[arg(long)]
    pub password: String,

    /// admin or member
    #[arg(long, default_value = "member")]
    #[serde(default)]
    pub role: Role,
}

pub async fn add_handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<AddUserRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let user = state
        .catalog()
        .add_user(&caller.session, &req.username, &req.password, req.role)?;
    tracing::info!(username = %user.username, role = %user.role, by = %caller.session.username, "user added");
    Ok((http::StatusCode::CREATED, Json(UserResponse { user })))
}

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct RemoveUserRequest {
    pub username: String,
}

/// Remove the account and end its sessions.
pub async fn remove_handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<RemoveUserRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let user = state
        .catalog()
        .remove_user(&caller.session, &req.username)?;
    let ended = state.sessions().revoke_user(&user.username);
    tracing::info!(username = %user.username, sessions_ended = ended, "user removed");
    Ok(Json(UserResponse { user }))
}

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct ResetPasswordRequest {
    pub username: String,

    /// New password
    #[arg(long)]
    pub password: String,
}

/// Set another user's password. Their open sessions are ended.
pub async fn reset_password_handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AdminError> {
    let user = state
        .catalog()
        .reset_password(&caller.session, &req.username, &req.password)?;
    if user.username != caller.session.username {
        let ended = state.sessions().revoke_user(&user.username);
        tracing::info!(username = %user.username, sessions_ended = ended, "password reset by admin");
    }
    Ok(Json(UserResponse { user }))
}

impl ApiRequest for ListUsersRequest {
    type Response = UsersResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/admin/users/list")?;
        Ok(client.post(full_url).json(&self))
    }
}

impl ApiRequest for AddUserRequest {
    type Response = UserResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/admin/users/add")?;
        Ok(client.post(full_url).json(&self))
    }
}

impl ApiRequest for RemoveUserRequest {
    type Response = UserResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/admin/users/remove")?;
        Ok(client.post(full_url).json(&self))
    }
}

impl ApiRequest for ResetPasswordRequest {
    type Response = UserResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/admin/users/reset-password")?;
        Ok(client.post(full_url).json(&self))
    }
}
