use axum::extract::{Json, Multipart, State};
use axum::response::IntoResponse;
use common::auth::Session;
use common::model::{parse_tags, NewSlide, SlideRecord};

use super::{SlideResponse, SlidesError};
use crate::http_server::auth::ApiSession;
use crate::ServiceState;

/// Multipart fields accepted by the upload endpoint. `file` is required,
/// `tags` is a comma separated list.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<(String, Vec<u8>)>,
    pub title: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, SlidesError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "file" => {
                    let file_name = field
                        .file_name()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "upload".to_string());
                    let data = field.bytes().await?.to_vec();
                    form.file = Some((file_name, data));
                }
                "title" => {
                    let title = field.text().await?;
                    form.title = Some(title).filter(|t| !t.trim().is_empty());
                }
                "description" => form.description = field.text().await?,
                "tags" => form.tags = parse_tags(&field.text().await?),
                _ => {}
            }
        }

        Ok(form)
    }

    /// Write the file to the uploads directory and catalogue it. The stored
    /// file is removed again if the catalog rejects the record.
    pub async fn save(
        self,
        state: &ServiceState,
        session: &Session,
    ) -> Result<SlideRecord, SlidesError> {
        let (file_name, data) = self
            .file
            .ok_or_else(|| SlidesError::InvalidRequest("a file is required".into()))?;
        if data.is_empty() {
            return Err(SlidesError::InvalidRequest(format!(
                "uploaded file '{file_name}' is empty"
            )));
        }

        let source = state.uploads().store(&file_name, &data).await?;
        let stored_name = source.stored_name().map(str::to_string);

        let created = state.catalog().create_slide(
            session,
            NewSlide {
                title: self.title,
                description: self.description,
                tags: self.tags,
                source,
            },
        );

        match created {
            Ok(slide) => {
                tracing::info!(id = %slide.id, file_name, size = data.len(), "slide uploaded");
                Ok(slide)
            }
            Err(e) => {
                if let Some(stored_name) = stored_name {
                    if let Err(cleanup) = state.uploads().remove(&stored_name).await {
                        tracing::warn!(
                            stored_name,
                            error = %cleanup,
                            "failed to remove upload after rejected slide"
                        );
                    }
                }
                Err(e.into())
            }
        }
    }
}

pub async fn handler(
    State(state): State<ServiceState>,
    caller: ApiSession,
    multipart: Multipart,
) -> Result<impl IntoResponse, SlidesError> {
    let form = UploadForm::read(multipart).await?;
    let slide = form.save(&state, &caller.session).await?;
    Ok((http::StatusCode::CREATED, Json(SlideResponse { slide })))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use common::catalog::Catalog;
    use common::model::Role;

    use super::*;
    use crate::sessions::SessionStore;
    use crate::uploads::Uploads;

    #[tokio::test]
    async fn test_rejected_upload_leaves_no_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let catalog_dir = temp.path().join("catalog");
        std::fs::create_dir_all(&catalog_dir).unwrap();
        let catalog = Catalog::open(catalog_dir.join("slides.json")).unwrap();
        let uploads_dir = temp.path().join("uploads");
        let state = ServiceState::new(
            catalog,
            SessionStore::new(Duration::from_secs(60)),
            Uploads::open(&uploads_dir).await.unwrap(),
        );

        // The catalog can no longer write its document.
        std::fs::remove_dir_all(&catalog_dir).unwrap();

        let form = UploadForm {
            file: Some(("deck.pdf".to_string(), b"%PDF-1.4".to_vec())),
            ..UploadForm::default()
        };
        let session = Session::new("alice", Role::Member);
        assert!(form.save(&state, &session).await.is_err());
        assert_eq!(std::fs::read_dir(&uploads_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        let state = ServiceState::new(
            Catalog::in_memory(),
            SessionStore::new(Duration::from_secs(60)),
            Uploads::open(temp.path()).await.unwrap(),
        );
        let form = UploadForm {
            file: Some(("deck.pdf".to_string(), Vec::new())),
            ..UploadForm::default()
        };
        let session = Session::new("alice", Role::Member);
        assert!(matches!(
            form.save(&state, &session).await,
            Err(SlidesError::InvalidRequest(_))
        ));
    }
}
