use std::path::PathBuf;

use clap::Args;
use common::auth::{validate_password, validate_username};
use common::catalog::Catalog;
use common::error::CatalogError;

use slides_daemon::state::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Port for the UI + API server
    #[arg(long, default_value_t = 8080)]
    pub app_port: u16,

    /// Name of the first administrator
    #[arg(long, default_value = "admin")]
    pub admin_username: String,

    /// Password of the first administrator
    #[arg(long, env = "SLIDES_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,

    /// Directory for daily log files (stdout only if unset)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
    #[error("init failed: {0}")]
    Catalog(#[from] CatalogError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Reject a bad admin account before anything touches the disk
        validate_username(&self.admin_username)?;
        validate_password(&self.admin_password)?;

        let config = AppConfig {
            app_port: self.app_port,
            log_dir: self.log_dir.clone(),
            ..AppConfig::default()
        };
        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let catalog = Catalog::open(&state.catalog_path)?;
        let created = catalog.bootstrap_admin(&self.admin_username, &self.admin_password)?;
        let admin_line = if created {
            format!("created admin '{}'", self.admin_username)
        } else {
            "existing users kept".to_string()
        };

        Ok(format!(
            "Initialized slides directory at: {}\n\
             - Catalog: {}\n\
             - Uploads: {}\n\
             - Config: {}\n\
             - App port: {}\n\
             - Admin: {}",
            state.slides_dir.display(),
            state.catalog_path.display(),
            state.uploads_path.display(),
            state.config_path.display(),
            state.config.app_port,
            admin_line
        ))
    }
}
