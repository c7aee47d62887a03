//! # Auth gate
//!
//! A [`Session`] is the authenticated identity every catalog operation is
//! performed as. What a session may do is decided by [`authorize`] over
//! the [`Action`] capability enum:
//!
//! - admins may do anything
//! - members may create slides, view, edit and comment on slides they own
//!   or that are shared with them, and delete or re-share only their own
//! - members never manage users or read the activity log
//!
//! Sessions are produced by
//! [`Catalog::authenticate`](crate::catalog::Catalog::authenticate); how
//! long they live is up to the caller.

mod password;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::{Role, SlideRecord};

pub use password::{
    hash_password, validate_password, validate_username, verify_password, HashCost,
    MIN_PASSWORD_LEN,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn can(&self, action: Action<'_>) -> bool {
        authorize(self, action)
    }

    /// Like [`Session::can`], but as a `Forbidden` error.
    pub fn require(&self, action: Action<'_>) -> Result<(), CatalogError> {
        if authorize(self, action) {
            Ok(())
        } else {
            Err(CatalogError::forbidden(format!(
                "{} may not {}",
                self.username,
                action.describe()
            )))
        }
    }
}

/// Something a session may attempt.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    CreateSlide,
    ViewSlide(&'a SlideRecord),
    EditSlide(&'a SlideRecord),
    DeleteSlide(&'a SlideRecord),
    ShareSlide(&'a SlideRecord),
    CommentOn(&'a SlideRecord),
    ManageUsers,
    ViewActivity,
}

impl Action<'_> {
    fn describe(&self) -> String {
        match self {
            Action::CreateSlide => "create slides".to_string(),
            Action::ViewSlide(s) => format!("view slide #{}", s.id),
            Action::EditSlide(s) => format!("edit slide #{}", s.id),
            Action::DeleteSlide(s) => format!("delete slide #{}", s.id),
            Action::ShareSlide(s) => format!("change sharing of slide #{}", s.id),
            Action::CommentOn(s) => format!("comment on slide #{}", s.id),
            Action::ManageUsers => "manage users".to_string(),
            Action::ViewActivity => "view the activity log".to_string(),
        }
    }
}

pub fn authorize(session: &Session, action: Action<'_>) -> bool {
    if session.is_admin() {
        return true;
    }

    let user = session.username.as_str();
    match action {
        Action::CreateSlide => true,
        Action::ViewSlide(slide) | Action::EditSlide(slide) | Action::CommentOn(slide) => {
            slide.is_owned_by(user) || slide.is_shared_with(user)
        }
        Action::DeleteSlide(slide) | Action::ShareSlide(slide) => slide.is_owned_by(user),
        Action::ManageUsers | Action::ViewActivity => false,
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::model::{SlideId, SlideSource};

    fn slide(owner: &str, shared_with: &[&str]) -> SlideRecord {
        let now = OffsetDateTime::now_utc();
        SlideRecord {
            id: SlideId(1),
            title: "Deck".to_string(),
            description: String::new(),
            tags: vec![],
            owner: owner.to_string(),
            source: SlideSource::Link {
                url: "https://example.com".to_string(),
            },
            created_at: now,
            modified_at: now,
            shared_with: shared_with.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_admin_may_do_anything() {
        let admin = Session::new("root", Role::Admin);
        let s = slide("alice", &[]);
        assert!(admin.can(Action::DeleteSlide(&s)));
        assert!(admin.can(Action::ShareSlide(&s)));
        assert!(admin.can(Action::ManageUsers));
        assert!(admin.can(Action::ViewActivity));
    }

    #[test]
    fn test_member_on_own_slide() {
        let alice = Session::new("alice", Role::Member);
        let s = slide("alice", &[]);
        assert!(alice.can(Action::ViewSlide(&s)));
        assert!(alice.can(Action::EditSlide(&s)));
        assert!(alice.can(Action::DeleteSlide(&s)));
        assert!(alice.can(Action::ShareSlide(&s)));
        assert!(!alice.can(Action::ManageUsers));
    }

    #[test]
    fn test_member_on_shared_slide() {
        let bob = Session::new("bob", Role::Member);
        let s = slide("alice", &["bob"]);
        assert!(bob.can(Action::ViewSlide(&s)));
        assert!(bob.can(Action::EditSlide(&s)));
        assert!(bob.can(Action::CommentOn(&s)));
        assert!(!bob.can(Action::DeleteSlide(&s)));
        assert!(!bob.can(Action::ShareSlide(&s)));
    }

    #[test]
    fn test_member_on_foreign_slide() {
        let carol = Session::new("carol", Role::Member);
        let s = slide("alice", &["bob"]);
        assert!(!carol.can(Action::ViewSlide(&s)));
        assert!(!carol.can(Action::EditSlide(&s)));
        assert!(matches!(
            carol.require(Action::DeleteSlide(&s)),
            Err(CatalogError::Forbidden(_))
        ));
    }
}
