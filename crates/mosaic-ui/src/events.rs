use kanal::AsyncSender;
use mosaic_types::{AppEvent, FetchError, FetchFailure, UiEvent};

use crate::state::{FAILED_STATUS, FETCHING_STATUS, UiState};

/// What the loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiFlow {
    Redraw,
    Unchanged,
    Exit,
}

pub async fn handle_events(
    event: AppEvent,
    state: &mut UiState,
    ui_to_app_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<UiFlow> {
    let flow = match event {
        AppEvent::UiEvent(UiEvent::Search { term, category }) => {
            if !state.controls.search_enabled {
                tracing::debug!("[UI] search ignored, fetch already running");
                return Ok(UiFlow::Unchanged);
            }

            // the grid is about to be replaced
            state.slideshow.stop();

            let request = state.build_request(&term, category);
            state.term = term;
            tracing::info!(term = %request.term, category = %request.category, "[UI] search");

            state.controls.search_enabled = false;
            state.controls.play_enabled = false;
            state.controls.play_label = "Play";
            state.progress = 0.0;
            state.status = FETCHING_STATUS.to_string();
            state.error_report = None;

            if let Err(e) = ui_to_app_tx.send(AppEvent::FetchRequested(request.clone())).await {
                let failure = FetchFailure::new(
                    request.url(state.endpoint()),
                    FetchError::Transport(format!("backend unavailable: {e}")),
                );
                fail(state, failure);
            }
            UiFlow::Redraw
        }
        AppEvent::UiEvent(UiEvent::TogglePlayback) => {
            if !state.controls.play_enabled {
                tracing::debug!("[UI] play toggle ignored, control disabled");
                return Ok(UiFlow::Unchanged);
            }

            if state.slideshow.is_playing() {
                state.slideshow.stop();
                state.controls.play_label = "Play";
            } else if state.gallery.can_play() {
                state.slideshow.start();
                state.controls.play_label = "Pause";
            }
            UiFlow::Redraw
        }
        AppEvent::UiEvent(UiEvent::Render) => UiFlow::Redraw,
        AppEvent::UiEvent(UiEvent::Close) => {
            state.slideshow.stop();
            tracing::info!("[UI] window closed");
            UiFlow::Exit
        }
        AppEvent::FetchProgress { loaded, total } => {
            if total > 0 {
                state.progress = loaded as f64 / total as f64;
            }
            tracing::trace!(loaded, total, "[UI] progress");
            UiFlow::Redraw
        }
        AppEvent::FetchSucceeded { url, images } => {
            let count = images.len();
            match state.gallery.publish(images) {
                Ok(()) => {
                    tracing::info!(%url, images = count, "[UI] gallery populated");
                    state.status = url;
                    state.restore_controls();
                }
                Err(error) => fail(state, FetchFailure::new(url, error)),
            }
            UiFlow::Redraw
        }
        AppEvent::FetchFailed(failure) => {
            fail(state, failure);
            UiFlow::Redraw
        }
        AppEvent::SlideshowTick { generation } => {
            if !state.slideshow.accepts(generation) {
                tracing::trace!(generation, "[UI] stale tick dropped");
                return Ok(UiFlow::Unchanged);
            }
            match state.gallery.swap_random() {
                Some(swap) => {
                    tracing::debug!(
                        slot = swap.slot,
                        shown = swap.shown,
                        hidden = swap.hidden,
                        "[UI] swapped"
                    );
                    UiFlow::Redraw
                }
                None => UiFlow::Unchanged,
            }
        }
        AppEvent::BackendReady => {
            tracing::debug!("[UI] backend ready");
            UiFlow::Unchanged
        }
        AppEvent::FetchRequested(_) => UiFlow::Unchanged,
    };

    Ok(flow)
}

fn fail(state: &mut UiState, failure: FetchFailure) {
    tracing::error!(url = %failure.url, error = %failure.error, "[UI] fetch failed");
    state.status = FAILED_STATUS.to_string();
    state.error_report = Some(failure.report());
    state.restore_controls();
}
