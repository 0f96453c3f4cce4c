
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use mosaic_config::Config;
use mosaic_types::{AppEvent, DecodedImage, ImageRef, LoadedImageSet};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::state::UiState;

pub(crate) const URL: &str = "https://itunes.apple.com/search?term=daft+punk&media=music&limit=200";

pub(crate) struct Harness {
    pub state: UiState,
    /// Receives slideshow ticks, standing in for the app-to-ui queue
    pub app_rx: AsyncReceiver<AppEvent>,
    pub app_tx: AsyncSender<AppEvent>,
    pub ui_tx: AsyncSender<AppEvent>,
    pub ui_rx: AsyncReceiver<AppEvent>,
    pub cancel: CancellationToken,
}

pub(crate) fn harness(interval_ms: u64) -> Harness {
    let mut config = Config::default();
    config.slideshow.interval_ms = interval_ms;
    config.slideshow.seed = Some(7);

    let (app_tx, app_rx) = kanal::bounded_async(256);
    let (ui_tx, ui_rx) = kanal::bounded_async(64);
    let cancel = CancellationToken::new();
    let state = UiState::new(&config, Handle::current(), app_tx.clone(), cancel.clone());

    Harness {
        state,
        app_rx,
        app_tx,
        ui_tx,
        ui_rx,
        cancel,
    }
}

pub(crate) fn image_set(count: usize) -> LoadedImageSet {
    LoadedImageSet::new(
        (0..count)
            .map(|i| DecodedImage {
                uri: ImageRef(format!("https://img.example/{i}.jpg")),
                width: 100,
                height: 100,
                pixels: Arc::from(vec![0u8; 4]),
            })
            .collect(),
    )
}
