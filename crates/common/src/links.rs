//! Recognising presentation links: which host a deck lives on, how to
//! embed it, and what to call it when the uploader gave no title.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CatalogError;
use crate::model::SlideSource;

/// Hosts whose decks can be shown inline in an iframe.
const EMBEDDABLE_HOSTS: &[&str] = &[
    "canva.com",
    "slideshare.net",
    "speakerdeck.com",
    "visme.co",
    "prezi.com",
    "haikudeck.com",
    "slideonline.com",
];

const GOOGLE_HOSTS: &[&str] = &["docs.google.com", "drive.google.com"];

/// An iframe source for previewing a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub src: String,
    pub height: u32,
}

static PRESENTATION_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").unwrap());

static SLIDESHARE_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"slideshare\.net/.*/([^/?#]+)").unwrap());

fn host_matches(url: &Url, domain: &str) -> bool {
    match url.host_str() {
        Some(host) => {
            let host = host.to_ascii_lowercase();
            host == domain || host.ends_with(&format!(".{domain}"))
        }
        None => false,
    }
}

/// Parse a user supplied link, accepting only absolute http(s) URLs.
pub fn parse_link(raw: &str) -> Result<Url, CatalogError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CatalogError::validation("a link or a file is required"));
    }
    let url = Url::parse(raw)
        .map_err(|e| CatalogError::validation(format!("invalid link '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(CatalogError::validation(format!(
            "link must be an http(s) URL: {raw}"
        ))),
    }
}

pub fn is_google(url: &Url) -> bool {
    GOOGLE_HOSTS.iter().any(|h| host_matches(url, h))
}

pub fn is_embeddable(url: &Url) -> bool {
    EMBEDDABLE_HOSTS.iter().any(|h| host_matches(url, h))
}

/// Presentation id from `…/presentation/d/<id>/…`, `…/file/d/<id>/…`
/// or a Drive `?id=<id>` link.
pub fn google_presentation_id(url: &Url) -> Option<String> {
    if let Some(caps) = PRESENTATION_ID_REGEX.captures(url.path()) {
        return Some(caps[1].to_string());
    }
    url.query_pairs()
        .find(|(k, v)| k == "id" && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

/// Turn a link into a slide source. Google links without a recognisable
/// presentation id are kept as plain links.
pub fn classify(raw: &str) -> Result<SlideSource, CatalogError> {
    let url = parse_link(raw)?;
    let url_string = url.to_string();
    if is_google(&url) {
        if let Some(presentation_id) = google_presentation_id(&url) {
            return Ok(SlideSource::Google {
                url: url_string,
                presentation_id,
            });
        }
    }
    Ok(SlideSource::Link { url: url_string })
}

pub fn google_embed_url(presentation_id: &str) -> String {
    format!("https://docs.google.com/presentation/d/{presentation_id}/embed")
}

/// Embed for a link source. Stored files are previewed by the daemon.
pub fn embed(source: &SlideSource) -> Option<Embed> {
    match source {
        SlideSource::Google {
            presentation_id, ..
        } => Some(Embed {
            src: google_embed_url(presentation_id),
            height: 450,
        }),
        SlideSource::Link { url } => {
            let parsed = Url::parse(url).ok()?;
            if !is_embeddable(&parsed) {
                return None;
            }
            let base = url.trim_end_matches('/');
            if host_matches(&parsed, "canva.com") || host_matches(&parsed, "speakerdeck.com") {
                Some(Embed {
                    src: format!("{base}/embed"),
                    height: 500,
                })
            } else if host_matches(&parsed, "slideshare.net") {
                let caps = SLIDESHARE_KEY_REGEX.captures(url)?;
                Some(Embed {
                    src: format!(
                        "https://www.slideshare.net/slideshow/embed_code/key/{}",
                        &caps[1]
                    ),
                    height: 500,
                })
            } else {
                None
            }
        }
        SlideSource::File { .. } => None,
    }
}

/// Title used when an uploader leaves the field blank.
pub fn default_title(source: &SlideSource) -> String {
    match source {
        SlideSource::Google { .. } => "Google Slides Presentation".to_string(),
        SlideSource::Link { url } => match Url::parse(url) {
            Ok(parsed) if host_matches(&parsed, "canva.com") => "Canva Presentation".to_string(),
            Ok(parsed) if host_matches(&parsed, "slideshare.net") => {
                "SlideShare Presentation".to_string()
            }
            Ok(parsed) if host_matches(&parsed, "speakerdeck.com") => {
                "SpeakerDeck Presentation".to_string()
            }
            Ok(parsed) => match parsed.host_str() {
                Some(host) => format!("Presentation from {}", host.trim_start_matches("www.")),
                None => "Untitled Presentation".to_string(),
            },
            Err(_) => "Untitled Presentation".to_string(),
        },
        SlideSource::File { file_name, .. } => std::path::Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "Untitled Presentation".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_presentation_id_from_edit_link() {
        let source =
            classify("https://docs.google.com/presentation/d/1AbC-d_9/edit#slide=id.p").unwrap();
        assert_eq!(
            source,
            SlideSource::Google {
                url: "https://docs.google.com/presentation/d/1AbC-d_9/edit#slide=id.p".to_string(),
                presentation_id: "1AbC-d_9".to_string(),
            }
        );
    }

    #[test]
    fn test_google_drive_open_link_uses_query_id() {
        let url = Url::parse("https://drive.google.com/open?id=XYZ123").unwrap();
        assert_eq!(google_presentation_id(&url).as_deref(), Some("XYZ123"));
    }

    #[test]
    fn test_google_link_without_id_is_plain_link() {
        let source = classify("https://docs.google.com/").unwrap();
        assert_eq!(source.kind(), crate::model::SlideKind::Link);
    }

    #[test]
    fn test_rejects_non_http_links() {
        assert!(matches!(
            classify("ftp://example.com/deck.pdf"),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(classify("   "), Err(CatalogError::Validation(_))));
        assert!(matches!(
            classify("not a url"),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_embeds() {
        let google = classify("https://docs.google.com/presentation/d/abc/edit").unwrap();
        assert_eq!(
            embed(&google).unwrap().src,
            "https://docs.google.com/presentation/d/abc/embed"
        );

        let canva = classify("https://www.canva.com/design/DAF/view/").unwrap();
        assert_eq!(
            embed(&canva).unwrap().src,
            "https://www.canva.com/design/DAF/view/embed"
        );

        let slideshare = classify("https://www.slideshare.net/someone/quarterly-review").unwrap();
        assert_eq!(
            embed(&slideshare).unwrap().src,
            "https://www.slideshare.net/slideshow/embed_code/key/quarterly-review"
        );

        let other = classify("https://example.com/deck").unwrap();
        assert!(embed(&other).is_none());
    }

    #[test]
    fn test_default_titles() {
        let google = classify("https://docs.google.com/presentation/d/abc/edit").unwrap();
        assert_eq!(default_title(&google), "Google Slides Presentation");

        let deck = classify("https://speakerdeck.com/me/talk").unwrap();
        assert_eq!(default_title(&deck), "SpeakerDeck Presentation");

        let other = classify("https://www.example.org/x").unwrap();
        assert_eq!(default_title(&other), "Presentation from example.org");

        let file = SlideSource::File {
            file_name: "Q1 Review.pptx".to_string(),
            stored_name: "x".to_string(),
            content_type: "application/octet-stream".to_string(),
            size: 1,
        };
        assert_eq!(default_title(&file), "Q1 Review");
    }
}
