use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::model::SlideSource;
use uuid::Uuid;

/// Uploaded deck files, stored flat under a generated name.
#[derive(Debug, Clone)]
pub struct Uploads {
    dir: Arc<PathBuf>,
}

impl Uploads {
    pub async fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir: Arc::new(dir) })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` and describe it as a file source. The stored name keeps
    /// the original extension so the content type survives a restart.
    pub async fn store(&self, file_name: &str, data: &[u8]) -> io::Result<SlideSource> {
        let file_name = sanitize_file_name(file_name);
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();
        let stored_name = format!("{}{}", Uuid::new_v4().simple(), extension);

        tokio::fs::write(self.dir.join(&stored_name), data).await?;
        tracing::debug!(stored_name, size = data.len(), "stored upload");

        Ok(SlideSource::File {
            content_type: content_type_for(&file_name),
            file_name,
            stored_name,
            size: data.len() as u64,
        })
    }

    pub async fn read(&self, stored_name: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path(stored_name)?).await
    }

    /// Remove a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, stored_name: &str) -> io::Result<()> {
        match tokio::fs::remove_file(self.path(stored_name)?).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(stored_name, "upload already missing on delete");
                Ok(())
            }
            other => other,
        }
    }

    fn path(&self, stored_name: &str) -> io::Result<PathBuf> {
        let valid = !stored_name.is_empty()
            && stored_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
            && !stored_name.starts_with('.');
        if !valid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid stored file name: {stored_name}"),
            ));
        }
        Ok(self.dir.join(stored_name))
    }
}

pub fn content_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}

/// Keep only the final path component of a client supplied name.
fn sanitize_file_name(file_name: &str) -> String {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() {
        "upload".to_string()
    } else {
        name.to_string()
    }
}
