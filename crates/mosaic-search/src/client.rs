use std::time::Duration;

use async_trait::async_trait;
use mosaic_types::{FetchError, ImageRef, SearchRequest};
use reqwest::StatusCode;

use crate::schema::parse_response;

/// Media search provider interface
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Endpoint the request is rendered against
    fn endpoint(&self) -> &str;

    /// Run a search and return one image reference per result entry
    async fn search(&self, request: &SearchRequest) -> Result<Vec<ImageRef>, FetchError>;
}

#[derive(Clone)]
pub struct ItunesClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ItunesClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl SearchClient for ItunesClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<ImageRef>, FetchError> {
        let url = request.url(&self.endpoint);
        tracing::debug!(%url, "sending search request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Transport(format!("HTTP {}", response.status())));
        }

        let body = response.text().await.map_err(transport_error)?;
        parse_response(&body)
    }
}

pub(crate) fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Transport(format!("request timed out: {e}"))
    } else {
        FetchError::Transport(e.to_string())
    }
}
