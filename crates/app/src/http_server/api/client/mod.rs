use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

#[allow(clippy::module_inception)]
mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;

/// A JSON API call. Each endpoint's request type knows how to build its own
/// HTTP request so the CLI can send it without repeating routes.
pub trait ApiRequest {
    type Response: DeserializeOwned;

    fn build_request(self, base_url: &Url, client: &Client)
        -> Result<RequestBuilder, url::ParseError>;
}
