use slides_daemon::http_server::api::v0::slides::CreateRequest;

use super::{format_slide, SlideError};

#[async_trait::async_trait]
impl crate::cli::op::Op for CreateRequest {
    type Error = SlideError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.clone()).await?;
        Ok(format!("Added\n{}", format_slide(&response.slide)))
    }
}
