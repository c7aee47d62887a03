use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::model::{ActivityEntry, ActivityKind, Comment, CommentId, SlideId, SlideRecord, User};

/// The whole persisted state. Rewritten in full on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Highest slide id ever handed out.
    #[serde(default)]
    pub last_slide_id: u64,
    #[serde(default)]
    pub last_comment_id: u64,
    #[serde(default)]
    pub slides: Vec<SlideRecord>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub activity: Vec<ActivityEntry>,
}

impl Document {
    /// Repair counters on a hand-edited or older document so ids stay unique.
    pub(crate) fn normalize(&mut self) {
        let max_slide = self.slides.iter().map(|s| s.id.0).max().unwrap_or(0);
        let max_comment = self.comments.iter().map(|c| c.id.0).max().unwrap_or(0);
        self.last_slide_id = self.last_slide_id.max(max_slide);
        self.last_comment_id = self.last_comment_id.max(max_comment);
    }

    pub(crate) fn allocate_slide_id(&mut self) -> SlideId {
        self.last_slide_id += 1;
        SlideId(self.last_slide_id)
    }

    pub(crate) fn allocate_comment_id(&mut self) -> CommentId {
        self.last_comment_id += 1;
        CommentId(self.last_comment_id)
    }

    pub(crate) fn slide(&self, id: SlideId) -> Option<&SlideRecord> {
        self.slides.iter().find(|s| s.id == id)
    }

    pub(crate) fn slide_mut(&mut self, id: SlideId) -> Option<&mut SlideRecord> {
        self.slides.iter_mut().find(|s| s.id == id)
    }

    pub(crate) fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub(crate) fn user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.username == username)
    }

    pub(crate) fn comment_count(&self, slide_id: SlideId) -> usize {
        self.comments
            .iter()
            .filter(|c| c.slide_id == slide_id)
            .count()
    }

    pub(crate) fn log(&mut self, actor: &str, kind: ActivityKind, subject: impl Into<String>) {
        self.activity.push(ActivityEntry {
            at: OffsetDateTime::now_utc(),
            actor: actor.to_string(),
            kind,
            subject: subject.into(),
        });
    }

    /// Keep only the newest `limit` activity entries.
    pub(crate) fn trim_activity(&mut self, limit: usize) {
        if self.activity.len() > limit {
            let excess = self.activity.len() - limit;
            self.activity.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_default_to_empty() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, Document::default());
    }

    #[test]
    fn test_normalize_raises_counters_to_existing_ids() {
        let json = r#"{
            "slides": [{
                "id": 7, "title": "t", "owner": "a",
                "source": {"type": "link", "url": "https://example.com"},
                "created_at": "2024-01-01T00:00:00Z",
                "modified_at": "2024-01-01T00:00:00Z"
            }]
        }"#;
        let mut doc: Document = serde_json::from_str(json).unwrap();
        doc.normalize();
        assert_eq!(doc.allocate_slide_id(), SlideId(8));
    }

    #[test]
    fn test_trim_activity_keeps_newest() {
        let mut doc = Document::default();
        for i in 0..5 {
            doc.log("a", ActivityKind::LoggedIn, format!("{i}"));
        }
        doc.trim_activity(2);
        let subjects: Vec<_> = doc.activity.iter().map(|a| a.subject.as_str()).collect();
        assert_eq!(subjects, vec!["3", "4"]);
    }
}
