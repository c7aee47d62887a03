/**
 * Sessions and the permission model.
 *  - Password hashing and validation
 *  - The `Action` capability enum and `authorize`
 */
pub mod auth;
/**
 * The record store. One JSON document holding
 *  slides, comments, users and the activity log,
 *  rewritten in full on every mutation.
 */
pub mod catalog;
/**
 * Read-only aggregate over the catalog for the
 *  dashboard page and endpoint.
 */
pub mod dashboard;
pub mod error;
/**
 * Recognising Google Slides and other presentation
 *  links, their embeds and default titles.
 */
pub mod links;
pub mod model;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::auth::{authorize, Action, HashCost, Session};
    pub use crate::catalog::{Catalog, SlideFilter};
    pub use crate::dashboard::{Dashboard, DashboardStats, SlideSummary, TagCount};
    pub use crate::error::CatalogError;
    pub use crate::links::Embed;
    pub use crate::model::{
        ActivityEntry, ActivityKind, Comment, CommentId, NewSlide, Role, SlideId, SlideKind,
        SlidePatch, SlideRecord, SlideSource, UserInfo,
    };
    pub use crate::version::build_info;
}
