use super::Catalog;
use crate::auth::{Action, Session};
use crate::error::CatalogError;
use crate::model::ActivityEntry;

impl Catalog {
    /// The most recent `limit` entries, newest first.
    pub fn view_activity_log(
        &self,
        session: &Session,
        limit: usize,
    ) -> Result<Vec<ActivityEntry>, CatalogError> {
        session.require(Action::ViewActivity)?;
        Ok(self.read(|doc| doc.activity.iter().rev().take(limit).cloned().collect()))
    }
}
