use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::auth::Session;
use crate::catalog::{Catalog, SlideFilter};
use crate::links::{self, Embed};
use crate::model::{SlideKind, SlideRecord, SlideSource};

const PDF_PREVIEW_HEIGHT: u32 = 600;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub google: usize,
    pub links: usize,
    pub files: usize,
    /// Most used first, then alphabetical.
    pub tags: Vec<TagCount>,
}

impl DashboardStats {
    pub fn from_slides<'a>(slides: impl IntoIterator<Item = &'a SlideRecord>) -> Self {
        let mut stats = Self::default();
        let mut tags: BTreeMap<&str, usize> = BTreeMap::new();

        for slide in slides {
            stats.total += 1;
            match slide.kind() {
                SlideKind::Google => stats.google += 1,
                SlideKind::Link => stats.links += 1,
                SlideKind::File => stats.files += 1,
            }
            for tag in &slide.tags {
                *tags.entry(tag.as_str()).or_default() += 1;
            }
        }

        stats.tags = tags
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect();
        // stable sort keeps the alphabetical order from the map on ties
        stats.tags.sort_by(|a, b| b.count.cmp(&a.count));
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSummary {
    pub slide: SlideRecord,
    pub comment_count: usize,
    pub embed: Option<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub slides: Vec<SlideSummary>,
}

/// Preview for a slide: the link embed, or the daemon's inline file route
/// for uploaded PDFs.
pub fn preview(slide: &SlideRecord) -> Option<Embed> {
    match &slide.source {
        SlideSource::File { content_type, .. } if content_type == "application/pdf" => {
            Some(Embed {
                src: format!("/files/{}", slide.id),
                height: PDF_PREVIEW_HEIGHT,
            })
        }
        source => links::embed(source),
    }
}

impl Catalog {
    /// Visible slides matching `filter` with their comment counts and
    /// previews. Stats are computed over the listed slides.
    pub fn dashboard(&self, session: &Session, filter: &SlideFilter) -> Dashboard {
        let slides = self.list_slides(session, filter);
        let stats = DashboardStats::from_slides(&slides);

        let slides = self.read(|doc| {
            slides
                .into_iter()
                .map(|slide| SlideSummary {
                    comment_count: doc.comment_count(slide.id),
                    embed: preview(&slide),
                    slide,
                })
                .collect()
        });

        Dashboard { stats, slides }
    }
}
