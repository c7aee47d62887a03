use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::CatalogError;

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_USERNAME_LEN: usize = 64;

/// Work factor for new password hashes. Verification always uses the
/// parameters recorded in the stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashCost {
    /// argon2 defaults.
    #[default]
    Standard,
    /// Minimum memory and a single pass, for tests and throwaway stores.
    Low,
}

impl HashCost {
    fn hasher(self) -> Result<Argon2<'static>, CatalogError> {
        let params = match self {
            HashCost::Standard => Params::default(),
            HashCost::Low => Params::new(Params::MIN_M_COST, 1, 1, None)?,
        };
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

pub fn hash_password(password: &str, cost: HashCost) -> Result<String, CatalogError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = cost.hasher()?.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// False for a wrong password or an unreadable stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("unreadable password hash in catalog: {}", e);
            false
        }
    }
}

pub fn validate_password(password: &str) -> Result<(), CatalogError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CatalogError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), CatalogError> {
    if username.is_empty() || username.len() > MAX_USERNAME_LEN {
        return Err(CatalogError::validation(format!(
            "username must be 1 to {MAX_USERNAME_LEN} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(CatalogError::validation(format!(
            "username '{username}' may only contain letters, digits, '.', '_' and '-'"
        )));
    }
    Ok(())
}
