use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
    #[error("not logged in, run 'slides login' first")]
    NotLoggedIn,
}

impl ApiError {
    /// Build from a failed response, preferring the `msg` of a JSON error body.
    pub(crate) fn from_body(status: StatusCode, body: String) -> Self {
        let msg = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("msg").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or(body);
        ApiError::HttpStatus(status, msg)
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::HttpStatus(status, _) => Some(*status),
            _ => None,
        }
    }
}
