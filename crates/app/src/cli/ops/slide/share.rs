use slides_daemon::http_server::api::v0::slides::ShareRequest;

use super::SlideError;

#[async_trait::async_trait]
impl crate::cli::op::Op for ShareRequest {
    type Error = SlideError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.clone()).await?;
        let slide = response.slide;
        if slide.shared_with.is_empty() {
            Ok(format!("#{} is no longer shared", slide.id))
        } else {
            Ok(format!(
                "#{} shared with {}",
                slide.id,
                slide.shared_with.join(", ")
            ))
        }
    }
}
