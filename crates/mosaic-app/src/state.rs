use std::sync::Arc;

use anyhow::Context;
use mosaic_config::Config;
use mosaic_search::{FetchPipeline, HttpImageLoader, ItunesClient};

pub type Pipeline = FetchPipeline<ItunesClient, HttpImageLoader>;

/// Read-only after startup
pub struct AppState {
    pub config: Config,
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = ItunesClient::new(config.search.endpoint.clone(), config.request_timeout())
            .context("building HTTP client")?;
        // image downloads share the search client's pool and timeout
        let loader = HttpImageLoader::new(client.http().clone());
        let pipeline = FetchPipeline::new(client, loader, config.images.max_in_flight);

        Ok(Self {
            config,
            pipeline: Arc::new(pipeline),
        })
    }
}
