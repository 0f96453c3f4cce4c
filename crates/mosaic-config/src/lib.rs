use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::images::ImagesConfig;
use self::search::SearchConfig;
use self::slideshow::SlideshowConfig;
use self::ui::UiConfig;

pub mod images;
pub mod search;
pub mod slideshow;
pub mod ui;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub images: ImagesConfig,
    pub slideshow: SlideshowConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Load a JSON config file, then apply environment overrides
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening config {}", path.display()))?;
        let config: Config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config.with_overrides(|key| env::var(key).ok()))
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("MOSAIC_ENDPOINT") {
            tracing::debug!(%endpoint, "endpoint overridden from environment");
            self.search.endpoint = endpoint;
        }

        if let Some(timeout) = lookup("MOSAIC_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.search.request_timeout_secs = timeout;
        }

        if let Some(interval) =
            lookup("MOSAIC_SLIDESHOW_INTERVAL_MS").and_then(|v| v.parse().ok())
        {
            self.slideshow.interval_ms = interval;
        }

        match lookup("MOSAIC_SEED").map(|v| v.parse::<u64>()) {
            Some(Ok(seed)) => self.slideshow.seed = Some(seed),
            Some(Err(e)) => tracing::warn!("ignoring MOSAIC_SEED: {e}"),
            None => {}
        }

        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.search.request_timeout_secs)
    }

    pub fn slideshow_interval(&self) -> Duration {
        // a zero interval would make tokio's interval panic
        Duration::from_millis(self.slideshow.interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use mosaic_types::Category;

    use super::*;

    #[test]
    fn defaults_target_itunes_music() {
        let config = Config::default();
        assert_eq!(config.search.endpoint, "https://itunes.apple.com/search");
        assert_eq!(config.search.default_term, "daft punk");
        assert_eq!(config.search.default_category, Category::Music);
        assert_eq!(config.search.limit, 200);
        assert_eq!(config.slideshow_interval(), Duration::from_millis(2000));
        assert_eq!(config.slideshow.seed, None);
        assert_eq!(config.images.max_in_flight, 8);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let json = r#"{ "search": { "default_category": "tvShow" }, "slideshow": { "seed": 7 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.search.default_category, Category::TvShow);
        assert_eq!(config.search.limit, 200);
        assert_eq!(config.slideshow.seed, Some(7));
        assert_eq!(config.slideshow.interval_ms, 2000);
        assert!(config.ui.render_on_update);
    }

    #[test]
    fn overrides_replace_values() {
        let config = Config::default().with_overrides(|key| match key {
            "MOSAIC_ENDPOINT" => Some("http://127.0.0.1:9/search".to_string()),
            "MOSAIC_SLIDESHOW_INTERVAL_MS" => Some("250".to_string()),
            "MOSAIC_SEED" => Some("not a number".to_string()),
            _ => None,
        });
        assert_eq!(config.search.endpoint, "http://127.0.0.1:9/search");
        assert_eq!(config.slideshow.interval_ms, 250);
        assert_eq!(config.slideshow.seed, None);
    }
}
