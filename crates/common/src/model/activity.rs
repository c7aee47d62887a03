use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    SlideCreated,
    SlideUpdated,
    SlideDeleted,
    SlideShared,
    CommentAdded,
    UserAdded,
    UserRemoved,
    PasswordReset,
    PasswordChanged,
    LoggedIn,
    LoginFailed,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActivityKind::SlideCreated => "slide created",
            ActivityKind::SlideUpdated => "slide updated",
            ActivityKind::SlideDeleted => "slide deleted",
            ActivityKind::SlideShared => "slide shared",
            ActivityKind::CommentAdded => "comment added",
            ActivityKind::UserAdded => "user added",
            ActivityKind::UserRemoved => "user removed",
            ActivityKind::PasswordReset => "password reset",
            ActivityKind::PasswordChanged => "password changed",
            ActivityKind::LoggedIn => "logged in",
            ActivityKind::LoginFailed => "login failed",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    pub actor: String,
    pub kind: ActivityKind,
    pub subject: String,
}
