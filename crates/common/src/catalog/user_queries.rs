use time::OffsetDateTime;

use super::Catalog;
use crate::auth::{
    hash_password, validate_password, validate_username, verify_password, Action, Session,
};
use crate::error::CatalogError;
use crate::model::{ActivityKind, Role, User, UserInfo};

impl Catalog {
    /// Create the first admin. A no-op returning `false` once any user exists.
    pub fn bootstrap_admin(&self, username: &str, password: &str) -> Result<bool, CatalogError> {
        let username = username.trim();
        validate_username(username)?;
        validate_password(password)?;

        if self.read(|doc| !doc.users.is_empty()) {
            tracing::debug!("catalog already has users, skipping admin bootstrap");
            return Ok(false);
        }

        let password_hash = hash_password(password, self.hash_cost())?;
        let created = self.mutate(|doc| {
            if !doc.users.is_empty() {
                return Ok(false);
            }
            doc.users.push(User {
                username: username.to_string(),
                password_hash,
                role: Role::Admin,
                created_at: OffsetDateTime::now_utc(),
            });
            doc.log(username, ActivityKind::UserAdded, format!("{username} (admin)"));
            Ok(true)
        })?;

        if created {
            tracing::info!(username, "bootstrapped admin user");
        }
        Ok(created)
    }

    /// Check credentials. Unknown users and wrong passwords fail alike.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Session, CatalogError> {
        let username = username.trim();
        let user = self.read(|doc| doc.user(username).cloned());

        match user {
            Some(user) if verify_password(password, &user.password_hash) => {
                self.record(&user.username, ActivityKind::LoggedIn, "");
                tracing::info!(username, "login succeeded");
                Ok(Session::new(user.username, user.role))
            }
            _ => {
                self.record(username, ActivityKind::LoginFailed, "");
                tracing::warn!(username, "login failed");
                Err(CatalogError::InvalidCredentials)
            }
        }
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.read(|doc| doc.user(username).is_some())
    }

    /// Look up the current role of a user, e.g. to refresh a cached session.
    pub fn user_info(&self, username: &str) -> Option<UserInfo> {
        self.read(|doc| doc.user(username).map(UserInfo::from))
    }

    pub fn list_users(&self, session: &Session) -> Result<Vec<UserInfo>, CatalogError> {
        session.require(Action::ManageUsers)?;
        let mut users: Vec<UserInfo> =
            self.read(|doc| doc.users.iter().map(UserInfo::from).collect());
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    pub fn add_user(
        &self,
        session: &Session,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<UserInfo, CatalogError> {
        session.require(Action::ManageUsers)?;
        let username = username.trim();
        validate_username(username)?;
        validate_password(password)?;

        if self.user_exists(username) {
            return Err(CatalogError::AlreadyExists(username.to_string()));
        }
        let password_hash = hash_password(password, self.hash_cost())?;

        let info = self.mutate(|doc| {
            if doc.user(username).is_some() {
                return Err(CatalogError::AlreadyExists(username.to_string()));
            }
            let user = User {
                username: username.to_string(),
                password_hash,
                role,
                created_at: OffsetDateTime::now_utc(),
            };
            let info = UserInfo::from(&user);
            doc.users.push(user);
            doc.log(
                &session.username,
                ActivityKind::UserAdded,
                format!("{username} ({role})"),
            );
            Ok(info)
        })?;

        tracing::info!(username, %role, by = %session.username, "user added");
        Ok(info)
    }

    /// Remove a user and scrub them from every sharing list. Their slides
    /// stay, owned by the removed name, and remain manageable by admins.
    pub fn remove_user(&self, session: &Session, username: &str) -> Result<UserInfo, CatalogError> {
        session.require(Action::ManageUsers)?;
        let username = username.trim();
        if username == session.username {
            return Err(CatalogError::validation("you cannot remove yourself"));
        }

        let info = self.mutate(|doc| {
            let user = doc
                .user(username)
                .ok_or_else(|| CatalogError::UserNotFound(username.to_string()))?;
            if user.role == Role::Admin
                && doc.users.iter().filter(|u| u.role == Role::Admin).count() <= 1
            {
                return Err(CatalogError::validation("cannot remove the last admin"));
            }
            let info = UserInfo::from(user);

            doc.users.retain(|u| u.username != username);
            for slide in doc.slides.iter_mut() {
                slide.shared_with.retain(|u| u != username);
            }
            doc.log(&session.username, ActivityKind::UserRemoved, username);
            Ok(info)
        })?;

        tracing::info!(username, by = %session.username, "user removed");
        Ok(info)
    }

    pub fn reset_password(
        &self,
        session: &Session,
        username: &str,
        new_password: &str,
    ) -> Result<UserInfo, CatalogError> {
        session.require(Action::ManageUsers)?;
        let username = username.trim();
        if !self.user_exists(username) {
            return Err(CatalogError::UserNotFound(username.to_string()));
        }
        validate_password(new_password)?;

        let password_hash = hash_password(new_password, self.hash_cost())?;
        let info = self.mutate(|doc| {
            let user = doc
                .user_mut(username)
                .ok_or_else(|| CatalogError::UserNotFound(username.to_string()))?;
            user.password_hash = password_hash;
            let info = UserInfo::from(&*user);
            doc.log(&session.username, ActivityKind::PasswordReset, username);
            Ok(info)
        })?;

        tracing::info!(username, by = %session.username, "password reset");
        Ok(info)
    }

    /// Self-service password change; the current password must match.
    pub fn change_password(
        &self,
        session: &Session,
        current: &str,
        new_password: &str,
    ) -> Result<(), CatalogError> {
        let stored = self
            .read(|doc| doc.user(&session.username).map(|u| u.password_hash.clone()))
            .ok_or_else(|| CatalogError::UserNotFound(session.username.clone()))?;
        if !verify_password(current, &stored) {
            return Err(CatalogError::InvalidCredentials);
        }
        validate_password(new_password)?;

        let password_hash = hash_password(new_password, self.hash_cost())?;
        self.mutate(|doc| {
            let user = doc
                .user_mut(&session.username)
                .ok_or_else(|| CatalogError::UserNotFound(session.username.clone()))?;
            user.password_hash = password_hash;
            doc.log(&session.username, ActivityKind::PasswordChanged, "");
            Ok(())
        })?;

        tracing::info!(username = %session.username, "password changed");
        Ok(())
    }
}
