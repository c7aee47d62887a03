use time::OffsetDateTime;

use super::Catalog;
use crate::auth::{Action, Session};
use crate::error::CatalogError;
use crate::model::{ActivityKind, Comment, SlideId};

const MAX_COMMENT_LEN: usize = 4000;

impl Catalog {
    pub fn add_comment(
        &self,
        session: &Session,
        slide_id: SlideId,
        text: &str,
    ) -> Result<Comment, CatalogError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CatalogError::validation("comment must not be empty"));
        }
        if text.chars().count() > MAX_COMMENT_LEN {
            return Err(CatalogError::validation(format!(
                "comment is longer than {MAX_COMMENT_LEN} characters"
            )));
        }

        let comment = self.mutate(|doc| {
            let slide = doc
                .slide(slide_id)
                .ok_or(CatalogError::SlideNotFound(slide_id))?;
            session.require(Action::CommentOn(slide))?;

            let comment = Comment {
                id: doc.allocate_comment_id(),
                slide_id,
                author: session.username.clone(),
                text: text.to_string(),
                created_at: OffsetDateTime::now_utc(),
            };
            doc.comments.push(comment.clone());
            doc.log(
                &session.username,
                ActivityKind::CommentAdded,
                format!("on #{slide_id}"),
            );
            Ok(comment)
        })?;

        tracing::debug!(slide_id = %slide_id, comment_id = %comment.id, "comment added");
        Ok(comment)
    }

    /// Oldest first.
    pub fn list_comments(
        &self,
        session: &Session,
        slide_id: SlideId,
    ) -> Result<Vec<Comment>, CatalogError> {
        let mut comments = self.read(|doc| {
            let slide = doc
                .slide(slide_id)
                .ok_or(CatalogError::SlideNotFound(slide_id))?;
            session.require(Action::ViewSlide(slide))?;
            Ok::<_, CatalogError>(
                doc.comments
                    .iter()
                    .filter(|c| c.slide_id == slide_id)
                    .cloned()
                    .collect::<Vec<_>>(),
            )
        })?;

        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(comments)
    }
}
