use slides_daemon::http_server::api::client::ApiError;
use slides_daemon::http_server::api::v0::admin::{
    AddUserRequest, ListUsersRequest, RemoveUserRequest, ResetPasswordRequest,
};

use super::format_user;

#[async_trait::async_trait]
impl crate::cli::op::Op for ListUsersRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.clone()).await?;
        Ok(response
            .users
            .iter()
            .map(format_user)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for AddUserRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.clone()).await?;
        Ok(format!("Added {}", format_user(&response.user)))
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for RemoveUserRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.clone()).await?;
        Ok(format!("Removed {}", response.user.username))
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for ResetPasswordRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.clone()).await?;
        Ok(format!(
            "Password reset for {}; their sessions were ended",
            response.user.username
        ))
    }
}
