use std::sync::Arc;

use async_trait::async_trait;
use mosaic_types::{DecodedImage, FetchError, ImageRef};
use reqwest::StatusCode;

/// Fetches and decodes one image reference
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, uri: &ImageRef) -> Result<DecodedImage, FetchError>;
}

#[derive(Clone)]
pub struct HttpImageLoader {
    client: reqwest::Client,
}

impl HttpImageLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, uri: &ImageRef) -> Result<DecodedImage, FetchError> {
        let failed = |reason: String| FetchError::ImageLoad {
            uri: uri.to_string(),
            reason,
        };

        let response = self
            .client
            .get(uri.as_str())
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(failed(format!("HTTP {}", response.status())));
        }

        let bytes = response.bytes().await.map_err(|e| failed(e.to_string()))?;

        // decoding is CPU bound
        let owned = uri.clone();
        tokio::task::spawn_blocking(move || decode_image(&owned, &bytes))
            .await
            .map_err(|e| failed(format!("decode task failed: {e}")))?
    }
}

/// Decode encoded image bytes to RGBA8
pub fn decode_image(uri: &ImageRef, bytes: &[u8]) -> Result<DecodedImage, FetchError> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|e| FetchError::ImageLoad {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?
        .to_rgba8();

    let (width, height) = rgba.dimensions();
    tracing::trace!(%uri, width, height, "decoded image");

    Ok(DecodedImage {
        uri: uri.clone(),
        width,
        height,
        pixels: Arc::from(rgba.into_raw()),
    })
}
