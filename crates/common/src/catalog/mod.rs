//! # Catalog
//!
//! The record store: slides, their comments, users and the activity log,
//! all held in one [`Document`] and persisted as a single JSON file.
//!
//! Every mutation works on a copy of the document, writes the copy in full
//! (temp file + rename in the same directory) and only then swaps it in, so
//! a rejected or failed operation leaves both memory and disk untouched.
//! There is no cross-process locking: two processes writing the same file
//! clobber each other, last writer wins.
//!
//! Operations are grouped by concern:
//! - `slide_queries`: create/get/update/delete/list and sharing
//! - `comment_queries`: append-only comment threads
//! - `user_queries`: authentication and user administration
//! - `activity_queries`: the admin activity log

mod activity_queries;
mod comment_queries;
mod document;
mod filter;
mod slide_queries;
mod user_queries;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tempfile::NamedTempFile;

use crate::auth::HashCost;
use crate::error::CatalogError;
use crate::model::ActivityKind;

pub(crate) use document::Document;
pub use filter::SlideFilter;

pub const DEFAULT_ACTIVITY_LIMIT: usize = 1000;

#[derive(Clone, Debug)]
pub struct Catalog {
    document: Arc<RwLock<Document>>,
    path: Option<Arc<PathBuf>>,
    hash_cost: HashCost,
    activity_limit: usize,
}

impl Catalog {
    /// Open the document at `path`, creating an empty one if the file is
    /// missing or blank.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref().to_path_buf();
        let (document, fresh) = read_document(&path)?;

        let catalog = Self {
            document: Arc::new(RwLock::new(document)),
            path: Some(Arc::new(path)),
            hash_cost: HashCost::default(),
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        };

        if fresh {
            let document = catalog.document.read().clone();
            catalog.persist(&document)?;
        }

        let (slides, users) = catalog.read(|doc| (doc.slides.len(), doc.users.len()));
        tracing::info!(
            path = %catalog.path().map(|p| p.display().to_string()).unwrap_or_default(),
            slides,
            users,
            "catalog opened"
        );
        Ok(catalog)
    }

    /// A catalog that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            document: Arc::new(RwLock::new(Document::default())),
            path: None,
            hash_cost: HashCost::default(),
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }

    pub fn with_hash_cost(mut self, cost: HashCost) -> Self {
        self.hash_cost = cost;
        self
    }

    pub fn with_activity_limit(mut self, limit: usize) -> Self {
        self.activity_limit = limit.max(1);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref().map(PathBuf::as_path)
    }

    /// Re-read the document from disk, dropping the in-memory copy.
    pub fn reload(&self) -> Result<(), CatalogError> {
        let Some(path) = self.path() else {
            return Ok(());
        };
        let (document, _) = read_document(path)?;
        *self.document.write() = document;
        tracing::debug!(path = %path.display(), "catalog reloaded");
        Ok(())
    }

    /// Cheap readiness probe: the backing file is still there and readable.
    pub fn check(&self) -> Result<(), CatalogError> {
        if let Some(path) = self.path() {
            fs::metadata(path)?;
        }
        Ok(())
    }

    pub(crate) fn hash_cost(&self) -> HashCost {
        self.hash_cost
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> T {
        f(&self.document.read())
    }

    /// Apply `f` to a copy of the document, persist it, then publish it.
    pub(crate) fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Document) -> Result<T, CatalogError>,
    ) -> Result<T, CatalogError> {
        let mut guard = self.document.write();
        let mut next = guard.clone();
        let out = f(&mut next)?;
        next.trim_activity(self.activity_limit);
        self.persist(&next)?;
        *guard = next;
        Ok(out)
    }

    /// Append to the activity log outside of another mutation. A failure
    /// here is logged, never returned.
    pub(crate) fn record(&self, actor: &str, kind: ActivityKind, subject: impl Into<String>) {
        let subject = subject.into();
        if let Err(e) = self.mutate(|doc| {
            doc.log(actor, kind, subject);
            Ok(())
        }) {
            tracing::warn!(actor, %kind, "failed to record activity: {}", e);
        }
    }

    fn persist(&self, document: &Document) -> Result<(), CatalogError> {
        let Some(path) = self.path() else {
            return Ok(());
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, document)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| CatalogError::Io(e.error))?;
        Ok(())
    }
}

/// Returns the document and whether it had to be created.
fn read_document(path: &Path) -> Result<(Document, bool), CatalogError> {
    if !path.exists() {
        return Ok((Document::default(), true));
    }

    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok((Document::default(), true));
    }

    let mut document: Document = serde_json::from_str(&raw)?;
    document.normalize();
    Ok((document, false))
}
