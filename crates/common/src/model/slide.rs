use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Identifier of a slide record. Allocated from a counter, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(pub u64);

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SlideId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(SlideId)
    }
}

/// Where the deck itself lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideSource {
    /// A Google Slides or Google Drive link.
    Google { url: String, presentation_id: String },
    /// Any other web presentation link.
    Link { url: String },
    /// A file uploaded to the daemon and kept in its uploads directory.
    File {
        file_name: String,
        stored_name: String,
        content_type: String,
        size: u64,
    },
}

impl SlideSource {
    pub fn kind(&self) -> SlideKind {
        match self {
            SlideSource::Google { .. } => SlideKind::Google,
            SlideSource::Link { .. } => SlideKind::Link,
            SlideSource::File { .. } => SlideKind::File,
        }
    }

    /// The external URL, if the deck is not a stored file.
    pub fn url(&self) -> Option<&str> {
        match self {
            SlideSource::Google { url, .. } | SlideSource::Link { url } => Some(url),
            SlideSource::File { .. } => None,
        }
    }

    pub fn stored_name(&self) -> Option<&str> {
        match self {
            SlideSource::File { stored_name, .. } => Some(stored_name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    Google,
    Link,
    File,
}

impl SlideKind {
    pub fn label(&self) -> &'static str {
        match self {
            SlideKind::Google => "Google Slides",
            SlideKind::Link => "Web Link",
            SlideKind::File => "Uploaded File",
        }
    }
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideKind::Google => write!(f, "google"),
            SlideKind::Link => write!(f, "link"),
            SlideKind::File => write!(f, "file"),
        }
    }
}

impl FromStr for SlideKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(SlideKind::Google),
            "link" => Ok(SlideKind::Link),
            "file" => Ok(SlideKind::File),
            other => Err(format!("unknown slide kind: {other}")),
        }
    }
}

/// A catalogued slide deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    pub id: SlideId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub owner: String,
    pub source: SlideSource,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
    /// Usernames, besides the owner, allowed to view and edit.
    #[serde(default)]
    pub shared_with: Vec<String>,
}

impl SlideRecord {
    pub fn kind(&self) -> SlideKind {
        self.source.kind()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        self.tags.iter().any(|t| *t == tag)
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner == username
    }

    pub fn is_shared_with(&self, username: &str) -> bool {
        self.shared_with.iter().any(|u| u == username)
    }
}

/// Input for creating a record. The owner is taken from the session.
#[derive(Debug, Clone)]
pub struct NewSlide {
    pub title: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub source: SlideSource,
}

/// Partial update; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct SlidePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub url: Option<String>,
}

impl SlidePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.url.is_none()
    }
}

pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Tags form an ordered set: trimmed, lower-cased, blanks dropped,
/// first occurrence wins.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = normalize_tag(tag.as_ref());
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Split a comma separated tag field as typed into a form or CLI flag.
pub fn parse_tags(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}
