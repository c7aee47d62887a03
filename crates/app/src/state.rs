use std::{fs, path::PathBuf};

use common::catalog::Catalog;
use common::error::CatalogError;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "slides";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CATALOG_FILE_NAME: &str = "slides.json";
pub const UPLOADS_DIR_NAME: &str = "uploads";
pub const SESSION_FILE_NAME: &str = "session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the App server (UI + API combined)
    #[serde(default = "default_app_port")]
    pub app_port: u16,
    /// Directory for daily log files, stdout only if unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// How long a login stays valid
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: u64,
    /// Largest accepted upload
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
    /// Number of activity entries kept in the catalog
    #[serde(default = "default_activity_log_limit")]
    pub activity_log_limit: usize,
}

fn default_app_port() -> u16 {
    8080
}

fn default_session_ttl_minutes() -> u64 {
    12 * 60
}

fn default_max_upload_mb() -> usize {
    100
}

fn default_activity_log_limit() -> usize {
    common::catalog::DEFAULT_ACTIVITY_LIMIT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_port: default_app_port(),
            log_dir: None,
            session_ttl_minutes: default_session_ttl_minutes(),
            max_upload_mb: default_max_upload_mb(),
            activity_log_limit: default_activity_log_limit(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the slides directory (~/.slides)
    pub slides_dir: PathBuf,
    /// Path to the catalog document
    pub catalog_path: PathBuf,
    /// Path to the uploaded files directory
    pub uploads_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Path to the CLI's saved login token
    pub session_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the slides directory path (custom or default ~/.slides)
    pub fn slides_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    pub fn exists(custom_path: Option<PathBuf>) -> Result<bool, StateError> {
        let slides_dir = Self::slides_dir(custom_path)?;
        Ok(slides_dir.join(CONFIG_FILE_NAME).exists())
    }

    /// Initialize a new slides state directory with an empty catalog
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let slides_dir = Self::slides_dir(custom_path)?;
        let state = Self::paths(slides_dir, config.unwrap_or_default());

        if state.config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&state.slides_dir)?;
        fs::create_dir_all(&state.uploads_path)?;

        let config_toml = toml::to_string_pretty(&state.config)?;
        fs::write(&state.config_path, config_toml)?;

        // Writes an empty document
        Catalog::open(&state.catalog_path)?;

        Ok(state)
    }

    /// Load existing state from the slides directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let slides_dir = Self::slides_dir(custom_path)?;

        if !slides_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = slides_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }
        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        let state = Self::paths(slides_dir, config);
        if !state.catalog_path.exists() {
            return Err(StateError::MissingFile(CATALOG_FILE_NAME.to_string()));
        }
        if !state.uploads_path.exists() {
            fs::create_dir_all(&state.uploads_path)?;
        }

        Ok(state)
    }

    pub fn save_session_token(&self, token: &str) -> Result<(), StateError> {
        fs::write(&self.session_path, token)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.session_path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    pub fn load_session_token(&self) -> Option<String> {
        fs::read_to_string(&self.session_path)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Returns whether a token was saved.
    pub fn clear_session_token(&self) -> Result<bool, StateError> {
        match fs::remove_file(&self.session_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn paths(slides_dir: PathBuf, config: AppConfig) -> Self {
        Self {
            catalog_path: slides_dir.join(CATALOG_FILE_NAME),
            uploads_path: slides_dir.join(UPLOADS_DIR_NAME),
            config_path: slides_dir.join(CONFIG_FILE_NAME),
            session_path: slides_dir.join(SESSION_FILE_NAME),
            slides_dir,
            config,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("slides directory not initialized. Run 'slides init' first")]
    NotInitialized,

    #[error("slides directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("state");

        let created = AppState::init(Some(dir.clone()), None).unwrap();
        assert!(created.catalog_path.exists());
        assert!(created.uploads_path.is_dir());

        let loaded = AppState::load(Some(dir.clone())).unwrap();
        assert_eq!(loaded.config, AppConfig::default());
        assert!(matches!(
            AppState::init(Some(dir), None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_uninitialized() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            AppState::load(Some(temp.path().join("missing"))),
            Err(StateError::NotInitialized)
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("app_port = 9000").unwrap();
        assert_eq!(config.app_port, 9000);
        assert_eq!(config.session_ttl_minutes, 720);
        assert_eq!(config.max_upload_mb, 100);
        assert_eq!(config.activity_log_limit, 1000);
    }

    #[test]
    fn test_session_token_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let state = AppState::init(Some(temp.path().join("s")), None).unwrap();

        assert_eq!(state.load_session_token(), None);
        state.save_session_token("abc123").unwrap();
        assert_eq!(state.load_session_token().as_deref(), Some("abc123"));
        assert!(state.clear_session_token().unwrap());
        assert!(!state.clear_session_token().unwrap());
    }
}
