use slides_daemon::http_server::api::v0::slides::UpdateRequest;

use super::{format_slide, SlideError};

#[async_trait::async_trait]
impl crate::cli::op::Op for UpdateRequest {
    type Error = SlideError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.clone()).await?;
        Ok(format!("Updated\n{}", format_slide(&response.slide)))
    }
}
