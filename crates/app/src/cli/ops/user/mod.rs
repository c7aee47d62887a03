use clap::{Args, Subcommand};
use common::model::UserInfo;

pub mod manage;

use crate::cli::op::Op;
use slides_daemon::http_server::api::v0::admin::{
    AddUserRequest, ListUsersRequest, RemoveUserRequest, ResetPasswordRequest,
};

crate::command_enum! {
    (List, ListUsersRequest),
    (Add, AddUserRequest),
    (Rm, RemoveUserRequest),
    (ResetPassword, ResetPasswordRequest),
}

// Rename the generated Command to UserCommand for clarity
pub type UserCommand = Command;

/// Manage accounts (admin only)
#[derive(Args, Debug, Clone)]
pub struct User {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[async_trait::async_trait]
impl Op for User {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

pub fn format_user(user: &UserInfo) -> String {
    format!("{:<16} {:<7} since {}", user.username, user.role.to_string(), user.created_at.date())
}
