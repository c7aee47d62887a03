use clap::Args;

use slides_daemon::state::{AppState, StateError};
use slides_daemon::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Override the configured app port
    #[arg(long)]
    pub app_port: Option<u16>,

    /// Log at debug level
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Load state from config path (or default ~/.slides)
        let state = AppState::load(ctx.config_path.clone())?;

        let mut config = ServiceConfig::from_state(&state);
        if let Some(port) = self.app_port {
            config.app_port = port;
        }
        if self.verbose {
            config.log_level = tracing::Level::DEBUG;
        }

        spawn_service(&config).await;
        Ok("daemon ended".to_string())
    }
}
