//! Records kept in the catalog document.

mod activity;
mod comment;
mod slide;
mod user;

pub use activity::{ActivityEntry, ActivityKind};
pub use comment::{Comment, CommentId};
pub use slide::{
    normalize_tag, normalize_tags, parse_tags, NewSlide, SlideId, SlideKind, SlidePatch,
    SlideRecord, SlideSource,
};
pub use user::{Role, User, UserInfo};
