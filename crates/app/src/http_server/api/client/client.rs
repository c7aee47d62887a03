use reqwest::multipart::Form;
use reqwest::Client;
use url::Url;

use super::error::ApiError;
use super::ApiRequest;

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub remote: Url,
    client: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(remote: &Url) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;

        Ok(Self {
            remote: remote.clone(),
            client,
            token: None,
        })
    }

    /// Attach a bearer token to every following call.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn call<T: ApiRequest>(&self, request: T) -> Result<T::Response, ApiError> {
        let mut request_builder = request.build_request(&self.remote, &self.client)?;
        if let Some(token) = &self.token {
            request_builder = request_builder.bearer_auth(token);
        }
        let response = request_builder.send().await?;

        if response.status().is_success() {
            Ok(response.json::<T::Response>().await?)
        } else {
            let status = response.status();
            Err(ApiError::from_body(status, response.text().await?))
        }
    }

    /// Post a multipart form to `path` with the current token.
    pub async fn upload<R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<R, ApiError> {
        let url = self.remote.join(path)?;
        let mut request_builder = self.client.post(url).multipart(form);
        if let Some(token) = &self.token {
            request_builder = request_builder.bearer_auth(token);
        }
        let response = request_builder.send().await?;

        if response.status().is_success() {
            Ok(response.json::<R>().await?)
        } else {
            let status = response.status();
            Err(ApiError::from_body(status, response.text().await?))
        }
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &Url {
        &self.remote
    }

    /// Get the underlying HTTP client for custom requests
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}
