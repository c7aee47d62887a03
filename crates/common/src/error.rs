use crate::model::SlideId;

/// Everything a catalog operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("slide #{0} not found")]
    SlideNotFound(SlideId),

    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("user '{0}' already exists")]
    AlreadyExists(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::SlideNotFound(_) | CatalogError::UserNotFound(_)
        )
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        CatalogError::Validation(msg.into())
    }

    pub(crate) fn forbidden(msg: impl Into<String>) -> Self {
        CatalogError::Forbidden(msg.into())
    }
}

impl From<argon2::password_hash::Error> for CatalogError {
    fn from(e: argon2::password_hash::Error) -> Self {
        CatalogError::PasswordHash(e.to_string())
    }
}

impl From<argon2::Error> for CatalogError {
    fn from(e: argon2::Error) -> Self {
        CatalogError::PasswordHash(e.to_string())
    }
}
