use slides_daemon::http_server::api::v0::slides::ListRequest;

use super::{format_slide_line, SlideError};

#[async_trait::async_trait]
impl crate::cli::op::Op for ListRequest {
    type Error = SlideError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.clone()).await?;

        if response.slides.is_empty() {
            Ok("No slides found".to_string())
        } else {
            Ok(response
                .slides
                .iter()
                .map(format_slide_line)
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}
