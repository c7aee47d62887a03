use clap::Args;

use slides_daemon::http_server::api::client::ApiError;
use slides_daemon::http_server::api::v0::auth::{LoginRequest, LogoutRequest, PasswordRequest};
use slides_daemon::state::{AppState, StateError};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("cannot save login: {0}")]
    State(#[from] StateError),
}

/// Log in and keep the session token in the config directory.
#[derive(Args, Debug, Clone)]
pub struct Login {
    #[command(flatten)]
    pub request: LoginRequest,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Login {
    type Error = LoginError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;
        let response = ctx.client.call(self.request.clone()).await?;
        state.save_session_token(&response.token)?;

        Ok(format!(
            "Logged in as {} ({}), session valid for {} minutes",
            response.username,
            response.role,
            response.expires_in_secs / 60
        ))
    }
}

#[derive(Args, Debug, Clone)]
pub struct Logout;

#[async_trait::async_trait]
impl crate::cli::op::Op for Logout {
    type Error = LoginError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;

        if ctx.client.token().is_some() {
            match ctx.client.call(LogoutRequest::default()).await {
                Ok(_) => {}
                // An expired session is as good as logged out
                Err(e) if e.status() == Some(http::StatusCode::UNAUTHORIZED) => {}
                Err(e) => return Err(e.into()),
            }
        }

        if state.clear_session_token()? {
            Ok("Logged out".to_string())
        } else {
            Ok("Not logged in".to_string())
        }
    }
}

/// Change your own password.
#[derive(Args, Debug, Clone)]
pub struct Passwd {
    #[command(flatten)]
    pub request: PasswordRequest,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Passwd {
    type Error = LoginError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.request.clone()).await?;
        Ok(format!("Password changed for {}", response.username))
    }
}
