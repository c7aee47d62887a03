use common::model::Comment;
use slides_daemon::http_server::api::v0::slides::{CommentRequest, CommentsRequest};

use super::SlideError;

pub fn format_comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "No comments".to_string();
    }
    comments
        .iter()
        .map(|c| format!("[{}] {}: {}", c.created_at, c.author, c.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait::async_trait]
impl crate::cli::op::Op for CommentRequest {
    type Error = SlideError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.clone()).await?;
        Ok(format!(
            "Comment {} added to #{}",
            response.comment.id, response.comment.slide_id
        ))
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for CommentsRequest {
    type Error = SlideError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.clone()).await?;
        Ok(format_comments(&response.comments))
    }
}
