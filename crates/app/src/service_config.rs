use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// Port for the App server (UI + API combined).
    pub app_port: u16,

    // data store configuration
    /// a path to the catalog document, if not set then an
    ///  in-memory catalog will be used
    pub catalog_path: Option<PathBuf>,
    /// Directory uploaded decks are stored in
    pub uploads_dir: PathBuf,
    /// Number of activity entries kept in the catalog
    pub activity_log_limit: usize,

    // sessions
    pub session_ttl: Duration,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_state(state: &crate::state::AppState) -> Self {
        Self {
            app_port: state.config.app_port,
            catalog_path: Some(state.catalog_path.clone()),
            uploads_dir: state.uploads_path.clone(),
            activity_log_limit: state.config.activity_log_limit,
            session_ttl: Duration::from_secs(state.config.session_ttl_minutes * 60),
            max_upload_bytes: state.config.max_upload_mb * 1024 * 1024,
            log_level: tracing::Level::INFO,
            log_dir: state.config.log_dir.clone(),
        }
    }
}
