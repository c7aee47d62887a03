use common::catalog::Catalog;
use common::error::CatalogError;

use crate::service_config::Config;
use crate::sessions::SessionStore;
use crate::uploads::Uploads;

/// Main service state, shared by every request handler
#[derive(Clone, Debug)]
pub struct State {
    catalog: Catalog,
    sessions: SessionStore,
    uploads: Uploads,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        // 1. Open the catalog document
        let catalog = match config.catalog_path {
            Some(ref path) => {
                if !path.exists() {
                    return Err(StateSetupError::CatalogPathDoesNotExist);
                }
                Catalog::open(path)?
            }
            None => {
                tracing::warn!("no catalog path configured, using an in-memory catalog");
                Catalog::in_memory()
            }
        }
        .with_activity_limit(config.activity_log_limit);

        // 2. Uploads directory
        let uploads = Uploads::open(&config.uploads_dir)
            .await
            .map_err(StateSetupError::Uploads)?;
        tracing::info!(path = %uploads.dir().display(), "uploads directory ready");

        // 3. Session table
        let sessions = SessionStore::new(config.session_ttl);

        Ok(Self::new(catalog, sessions, uploads))
    }

    pub fn new(catalog: Catalog, sessions: SessionStore, uploads: Uploads) -> Self {
        Self {
            catalog,
            sessions,
            uploads,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn uploads(&self) -> &Uploads {
        &self.uploads
    }
}

impl AsRef<Catalog> for State {
    fn as_ref(&self) -> &Catalog {
        self.catalog()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("Catalog path does not exist")]
    CatalogPathDoesNotExist,
    #[error("Catalog setup error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Uploads directory error: {0}")]
    Uploads(std::io::Error),
}
