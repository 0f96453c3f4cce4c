use std::num::NonZeroU32;

use kanal::AsyncSender;
use mosaic_config::Config;
use mosaic_config::search::SearchConfig;
use mosaic_core::query::{self, DEFAULT_LIMIT};
use mosaic_core::{Gallery, SlideshowEngine};
use mosaic_types::{AppEvent, Category, SearchRequest};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

pub const INITIAL_STATUS: &str = "Type in a term, select a media type, then search.";
pub const FETCHING_STATUS: &str = "Getting images...";
pub const FAILED_STATUS: &str = "Last attempt to get images failed...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub search_enabled: bool,
    pub play_enabled: bool,
    pub play_label: &'static str,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            search_enabled: true,
            play_enabled: false,
            play_label: "Play",
        }
    }
}

/// Everything the window shows, owned by the interactive thread only
pub struct UiState {
    pub gallery: Gallery,
    pub slideshow: SlideshowEngine,
    pub controls: Controls,
    /// Search field contents, prefilled from configuration
    pub term: String,
    /// Fraction of the current fetch already decoded
    pub progress: f64,
    pub status: String,
    /// Modal error report of the last failed fetch
    pub error_report: Option<String>,
    search: SearchConfig,
}

impl UiState {
    pub fn new(
        config: &Config,
        runtime: Handle,
        tick_tx: AsyncSender<AppEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            gallery: Gallery::seeded(config.slideshow.seed),
            slideshow: SlideshowEngine::new(config.slideshow_interval(), runtime, tick_tx, cancel),
            controls: Controls::default(),
            term: config.search.default_term.clone(),
            progress: 0.0,
            status: INITIAL_STATUS.to_string(),
            error_report: None,
            search: config.search.clone(),
        }
    }

    /// Build a request from the term as typed. An empty term is sent as is.
    pub fn build_request(&self, term: &str, category: Option<Category>) -> SearchRequest {
        let category = category.unwrap_or(self.search.default_category);
        let limit = NonZeroU32::new(self.search.limit).unwrap_or(DEFAULT_LIMIT);
        query::build(term, category, limit)
    }

    pub fn endpoint(&self) -> &str {
        &self.search.endpoint
    }

    /// Controls after a fetch ends, successful or not
    pub(crate) fn restore_controls(&mut self) {
        self.controls.search_enabled = true;
        self.controls.play_enabled = self.gallery.can_play();
        self.controls.play_label = if self.slideshow.is_playing() {
            "Pause"
        } else {
            "Play"
        };
        self.progress = 1.0;
    }
}
