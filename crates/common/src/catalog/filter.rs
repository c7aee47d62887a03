use serde::{Deserialize, Serialize};

use crate::model::{normalize_tag, SlideKind, SlideRecord};

/// Field predicates for listing slides. All given predicates must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideFilter {
    /// Exact tag, compared after normalisation.
    #[serde(default)]
    pub tag: Option<String>,
    /// Case-insensitive substring of the title.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub kind: Option<SlideKind>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SlideFilter {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, slide: &SlideRecord) -> bool {
        if let Some(tag) = non_blank(&self.tag) {
            let tag = normalize_tag(tag);
            if !slide.tags.iter().any(|t| *t == tag) {
                return false;
            }
        }
        if let Some(title) = non_blank(&self.title) {
            let needle = title.trim().to_lowercase();
            if !slide.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(owner) = non_blank(&self.owner) {
            if slide.owner != owner.trim() {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if slide.kind() != kind {
                return false;
            }
        }
        true
    }
}

// Empty form fields arrive as `Some("")`; treat them as absent.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
