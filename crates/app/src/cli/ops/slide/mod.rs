use clap::{Args, Subcommand};
use common::model::SlideRecord;

pub mod add;
pub mod comment;
pub mod edit;
pub mod list;
pub mod rm;
pub mod share;
pub mod show;
pub mod upload;

use crate::cli::op::Op;
use slides_daemon::http_server::api::client::ApiError;
use slides_daemon::http_server::api::v0::slides::{
    CommentRequest, CommentsRequest, CreateRequest, DeleteRequest, GetRequest, ListRequest,
    ShareRequest, UpdateRequest,
};

crate::command_enum! {
    (Add, CreateRequest),
    (Upload, upload::Upload),
    (List, ListRequest),
    (Show, GetRequest),
    (Edit, UpdateRequest),
    (Rm, DeleteRequest),
    (Share, ShareRequest),
    (Comment, CommentRequest),
    (Comments, CommentsRequest),
}

// Rename the generated Command to SlideCommand for clarity
pub type SlideCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Slide {
    #[command(subcommand)]
    pub command: SlideCommand,
}

#[async_trait::async_trait]
impl Op for Slide {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SlideError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },
}

/// One line per slide: id, title, kind, owner and tags.
pub fn format_slide_line(slide: &SlideRecord) -> String {
    let tags = if slide.tags.is_empty() {
        String::new()
    } else {
        format!("  #{}", slide.tags.join(" #"))
    };
    format!(
        "{:>4}  {}  [{}]  by {}{}",
        format!("#{}", slide.id),
        slide.title,
        slide.kind(),
        slide.owner,
        tags
    )
}

/// Multi-line description of a single slide.
pub fn format_slide(slide: &SlideRecord) -> String {
    let mut lines = vec![
        format!("#{} {}", slide.id, slide.title),
        format!("  kind:     {}", slide.kind().label()),
        format!("  owner:    {}", slide.owner),
        format!("  created:  {}", slide.created_at),
        format!("  modified: {}", slide.modified_at),
    ];
    if let Some(url) = slide.source.url() {
        lines.push(format!("  url:      {}", url));
    }
    if let common::model::SlideSource::File {
        file_name, size, ..
    } = &slide.source
    {
        lines.push(format!("  file:     {} ({} bytes)", file_name, size));
    }
    if !slide.tags.is_empty() {
        lines.push(format!("  tags:     {}", slide.tags.join(", ")));
    }
    if !slide.shared_with.is_empty() {
        lines.push(format!("  shared:   {}", slide.shared_with.join(", ")));
    }
    if !slide.description.is_empty() {
        lines.push(String::new());
        lines.push(format!("  {}", slide.description));
    }
    lines.join("\n")
}
