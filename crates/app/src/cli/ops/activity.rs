use clap::Args;

use slides_daemon::http_server::api::client::ApiError;
use slides_daemon::http_server::api::v0::admin::ActivityRequest;
use time::macros::format_description;

#[derive(Args, Debug, Clone)]
pub struct Activity {
    #[command(flatten)]
    pub request: ActivityRequest,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Activity {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.authed_client()?.call(self.request.clone()).await?;

        if response.entries.is_empty() {
            return Ok("No activity recorded".to_string());
        }

        let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        Ok(response
            .entries
            .iter()
            .map(|e| {
                let at = e.at.format(format).unwrap_or_else(|_| e.at.to_string());
                format!("{}  {:<12} {:<16} {}", at, e.actor, e.kind.to_string(), e.subject)
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
