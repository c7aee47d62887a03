use slides_daemon::http_server::api::v0::slides::{CommentsRequest, GetRequest};

use super::comment::format_comments;
use super::{format_slide, SlideError};

#[async_trait::async_trait]
impl crate::cli::op::Op for GetRequest {
    type Error = SlideError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.authed_client()?;
        let response = client.call(self.clone()).await?;
        let comments = client.call(CommentsRequest { id: self.id }).await?;

        let mut out = format_slide(&response.slide);
        if let Some(embed) = response.embed {
            out.push_str(&format!("\n  preview:  {}", embed.src));
        }
        out.push_str("\n\n");
        out.push_str(&format_comments(&comments.comments));
        Ok(out)
    }
}
