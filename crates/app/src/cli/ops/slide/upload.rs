use std::path::PathBuf;

use clap::Args;
use reqwest::multipart::{Form, Part};
use slides_daemon::http_server::api::v0::slides::SlideResponse;

use super::{format_slide, SlideError};

#[derive(Args, Debug, Clone)]
pub struct Upload {
    /// Presentation file to upload (PDF, PPTX, ...)
    pub path: PathBuf,

    /// Title; taken from the file name when omitted
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Tag, may be repeated
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Upload {
    type Error = SlideError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.authed_client()?;

        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SlideError::ReadFile {
                path: self.path.display().to_string(),
                source,
            })?;
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_guess::from_path(&self.path).first_or_octet_stream();

        let file_part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(content_type.as_ref())
            .map_err(slides_daemon::http_server::api::client::ApiError::from)?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("description", self.description.clone())
            .text("tags", self.tags.join(","));
        if let Some(title) = &self.title {
            form = form.text("title", title.clone());
        }

        let response: SlideResponse = client.upload("/api/v0/slides/upload", form).await?;
        Ok(format!("Uploaded\n{}", format_slide(&response.slide)))
    }
}
