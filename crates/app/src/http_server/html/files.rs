use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use common::model::{SlideId, SlideSource};
use serde::Deserialize;

use super::PageError;
use crate::http_server::auth::PageSession;
use crate::ServiceState;

#[derive(Debug, Default, Deserialize)]
pub struct FileQuery {
    /// Serve as an attachment instead of inline.
    #[serde(default)]
    pub download: bool,
}

/// Serve the stored file of an uploaded slide to anyone who may view it.
pub async fn handler(
    State(state): State<ServiceState>,
    caller: PageSession,
    Path(id): Path<SlideId>,
    Query(query): Query<FileQuery>,
) -> Result<Response, PageError> {
    let slide = state.catalog().get_slide(&caller.session, id)?;
    let SlideSource::File {
        file_name,
        stored_name,
        content_type,
        ..
    } = slide.source
    else {
        return Err(PageError::Form(format!("slide #{id} is a link, not a file")));
    };

    let data = state.uploads().read(&stored_name).await?;
    let disposition = format!(
        "{}; filename=\"{}\"",
        if query.download { "attachment" } else { "inline" },
        header_safe(&file_name)
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}

/// Header values must be visible ASCII; anything else in a client supplied
/// file name is replaced.
fn header_safe(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect()
}
