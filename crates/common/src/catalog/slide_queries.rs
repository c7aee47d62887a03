use time::OffsetDateTime;

use super::{Catalog, SlideFilter};
use crate::auth::{Action, Session};
use crate::error::CatalogError;
use crate::links;
use crate::model::{
    normalize_tags, ActivityKind, NewSlide, SlideId, SlidePatch, SlideRecord, SlideSource,
};

impl Catalog {
    /// Catalogue a new deck owned by the session's user.
    pub fn create_slide(
        &self,
        session: &Session,
        new: NewSlide,
    ) -> Result<SlideRecord, CatalogError> {
        session.require(Action::CreateSlide)?;

        match &new.source {
            SlideSource::Google {
                url,
                presentation_id,
            } => {
                links::parse_link(url)?;
                if presentation_id.trim().is_empty() {
                    return Err(CatalogError::validation(
                        "google link has no presentation id",
                    ));
                }
            }
            SlideSource::Link { url } => {
                links::parse_link(url)?;
            }
            SlideSource::File { file_name, .. } => {
                if file_name.trim().is_empty() {
                    return Err(CatalogError::validation("uploaded file has no name"));
                }
            }
        }

        let title = match new.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => links::default_title(&new.source),
        };

        let record = self.mutate(|doc| {
            let now = OffsetDateTime::now_utc();
            let record = SlideRecord {
                id: doc.allocate_slide_id(),
                title,
                description: new.description.trim().to_string(),
                tags: normalize_tags(&new.tags),
                owner: session.username.clone(),
                source: new.source,
                created_at: now,
                modified_at: now,
                shared_with: Vec::new(),
            };
            doc.slides.push(record.clone());
            doc.log(
                &session.username,
                ActivityKind::SlideCreated,
                format!("#{} {}", record.id, record.title),
            );
            Ok(record)
        })?;

        tracing::info!(
            slide_id = %record.id,
            owner = %record.owner,
            kind = %record.kind(),
            "slide created"
        );
        Ok(record)
    }

    pub fn get_slide(&self, session: &Session, id: SlideId) -> Result<SlideRecord, CatalogError> {
        self.read(|doc| {
            let slide = doc.slide(id).ok_or(CatalogError::SlideNotFound(id))?;
            session.require(Action::ViewSlide(slide))?;
            Ok(slide.clone())
        })
    }

    /// Apply `patch` and bump `modified_at`. An empty patch only touches
    /// the record.
    pub fn update_slide(
        &self,
        session: &Session,
        id: SlideId,
        patch: SlidePatch,
    ) -> Result<SlideRecord, CatalogError> {
        let record = self.mutate(|doc| {
            let slide = doc.slide_mut(id).ok_or(CatalogError::SlideNotFound(id))?;
            session.require(Action::EditSlide(slide))?;
            let new_source = patch.url.as_deref().map(links::classify).transpose()?;

            if let Some(title) = &patch.title {
                let title = title.trim();
                if title.is_empty() {
                    return Err(CatalogError::validation("title must not be empty"));
                }
                slide.title = title.to_string();
            }
            if let Some(description) = &patch.description {
                slide.description = description.trim().to_string();
            }
            if let Some(tags) = &patch.tags {
                slide.tags = normalize_tags(tags);
            }
            if let Some(source) = new_source {
                if matches!(slide.source, SlideSource::File { .. }) {
                    return Err(CatalogError::validation(
                        "an uploaded file cannot be replaced by a link",
                    ));
                }
                slide.source = source;
            }
            slide.modified_at = OffsetDateTime::now_utc();

            let record = slide.clone();
            doc.log(
                &session.username,
                ActivityKind::SlideUpdated,
                format!("#{} {}", record.id, record.title),
            );
            Ok(record)
        })?;

        tracing::info!(slide_id = %id, by = %session.username, "slide updated");
        Ok(record)
    }

    /// Remove a slide and every comment on it. Returns the removed record so
    /// the caller can clean up a stored file.
    pub fn delete_slide(
        &self,
        session: &Session,
        id: SlideId,
    ) -> Result<SlideRecord, CatalogError> {
        let (record, removed_comments) = self.mutate(|doc| {
            let slide = doc.slide(id).ok_or(CatalogError::SlideNotFound(id))?;
            session.require(Action::DeleteSlide(slide))?;

            let position = doc
                .slides
                .iter()
                .position(|s| s.id == id)
                .ok_or(CatalogError::SlideNotFound(id))?;
            let record = doc.slides.remove(position);

            let before = doc.comments.len();
            doc.comments.retain(|c| c.slide_id != id);
            let removed_comments = before - doc.comments.len();

            doc.log(
                &session.username,
                ActivityKind::SlideDeleted,
                format!("#{} {}", record.id, record.title),
            );
            Ok((record, removed_comments))
        })?;

        tracing::info!(
            slide_id = %id,
            by = %session.username,
            removed_comments,
            "slide deleted"
        );
        Ok(record)
    }

    /// Slides visible to the session that match `filter`, newest first.
    pub fn list_slides(&self, session: &Session, filter: &SlideFilter) -> Vec<SlideRecord> {
        let mut slides: Vec<SlideRecord> = self.read(|doc| {
            doc.slides
                .iter()
                .filter(|s| session.can(Action::ViewSlide(s)))
                .filter(|s| filter.matches(s))
                .cloned()
                .collect()
        });

        slides.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        if let Some(limit) = filter.limit {
            slides.truncate(limit);
        }
        slides
    }

    /// Replace the sharing list. Unknown usernames are rejected; the owner
    /// is never listed as a sharee of their own slide.
    pub fn set_sharing(
        &self,
        session: &Session,
        id: SlideId,
        usernames: Vec<String>,
    ) -> Result<SlideRecord, CatalogError> {
        let record = self.mutate(|doc| {
            let slide = doc.slide(id).ok_or(CatalogError::SlideNotFound(id))?;
            session.require(Action::ShareSlide(slide))?;
            let owner = slide.owner.clone();

            let mut shared_with: Vec<String> = Vec::new();
            for username in usernames {
                let username = username.trim().to_string();
                if username.is_empty() || username == owner || shared_with.contains(&username) {
                    continue;
                }
                if doc.user(&username).is_none() {
                    return Err(CatalogError::validation(format!(
                        "cannot share with unknown user '{username}'"
                    )));
                }
                shared_with.push(username);
            }

            let slide = doc.slide_mut(id).ok_or(CatalogError::SlideNotFound(id))?;
            slide.shared_with = shared_with;
            let record = slide.clone();

            let subject = if record.shared_with.is_empty() {
                format!("#{} shared with nobody", record.id)
            } else {
                format!("#{} shared with {}", record.id, record.shared_with.join(", "))
            };
            doc.log(&session.username, ActivityKind::SlideShared, subject);
            Ok(record)
        })?;

        tracing::info!(slide_id = %id, sharees = record.shared_with.len(), "sharing updated");
        Ok(record)
    }
}
