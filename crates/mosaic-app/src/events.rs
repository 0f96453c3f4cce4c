use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use mosaic_types::{AppEvent, UiEvent};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod fetch;

use fetch::handle_fetch;

/// Backend loop: runs fetches requested by the interactive thread
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut fetches = JoinSet::new();

    app_to_ui_tx.send(AppEvent::BackendReady).await?;
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            Some(joined) = fetches.join_next() => {
                if let Err(e) = joined.map_err(anyhow::Error::from).and_then(|r| r) {
                    tracing::error!("[EVENT_LOOP] fetch task failed: {e:#}");
                }
                continue;
            }
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        match event {
            AppEvent::FetchRequested(request) => {
                fetches.spawn(handle_fetch(state.clone(), request, app_to_ui_tx.clone()));
            }
            AppEvent::UiEvent(UiEvent::Close) => {
                tracing::info!("[EVENT_LOOP] window closed");
                break;
            }
            // interactive-thread events, nothing to do here
            AppEvent::UiEvent(_)
            | AppEvent::FetchProgress { .. }
            | AppEvent::FetchSucceeded { .. }
            | AppEvent::FetchFailed(_)
            | AppEvent::SlideshowTick { .. }
            | AppEvent::BackendReady => {}
        }
    }

    fetches.abort_all();
    tracing::info!("[EVENT_LOOP] stopped");
    Ok(())
}
