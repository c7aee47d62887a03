use clap::Args;

use slides_daemon::http_server::api::client::ApiError;
use slides_daemon::http_server::api::v0::dashboard::DashboardRequest;

use super::slide::format_slide_line;

#[derive(Args, Debug, Clone)]
pub struct Dashboard {
    #[command(flatten)]
    pub request: DashboardRequest,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Dashboard {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let dashboard = ctx.authed_client()?.call(self.request.clone()).await?;
        let stats = &dashboard.stats;

        let mut lines = vec![format!(
            "{} slides: {} Google Slides, {} links, {} files",
            stats.total, stats.google, stats.links, stats.files
        )];
        if !stats.tags.is_empty() {
            let tags = stats
                .tags
                .iter()
                .map(|t| format!("{} ({})", t.tag, t.count))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("Tags: {}", tags));
        }
        lines.push(String::new());
        for summary in &dashboard.slides {
            lines.push(format!(
                "{}  [{} comments]",
                format_slide_line(&summary.slide),
                summary.comment_count
            ));
        }

        Ok(lines.join("\n"))
    }
}
