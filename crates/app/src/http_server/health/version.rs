use axum::Json;
use common::version::BuildInfo;
use serde::Serialize;

/// Build facts plus the crate version the daemon was packaged as.
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub service: &'static str,
    pub package_version: &'static str,
    #[serde(flatten)]
    pub build: BuildInfo,
}

#[tracing::instrument]
pub async fn handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        service: env!("CARGO_PKG_NAME"),
        package_version: env!("CARGO_PKG_VERSION"),
        build: common::prelude::build_info(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reports_service_and_build() {
        let Json(body) = handler().await;
        assert_eq!(body.service, "slides");
        assert_eq!(body.build, common::prelude::build_info());

        let json = serde_json::to_value(&body).unwrap();
        assert!(json["build_profile"].is_string());
    }
}
