use std::sync::Arc;

use kanal::AsyncSender;
use mosaic_types::{AppEvent, SearchRequest};

use crate::state::AppState;

/// Run one fetch and report its outcome to the interactive thread
pub async fn handle_fetch(
    state: Arc<AppState>,
    request: SearchRequest,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let pipeline = state.pipeline.clone();
    let url = pipeline.url(&request);
    tracing::info!(%url, "[FETCH] started");

    let progress_tx = app_to_ui_tx.clone();
    let result = pipeline
        .fetch(&request, move |loaded, total| {
            // progress is advisory, a full queue just skips an update
            if let Err(e) = progress_tx.try_send(AppEvent::FetchProgress { loaded, total }) {
                tracing::debug!("[FETCH] progress dropped: {e}");
            }
        })
        .await;

    let event = match result {
        Ok(images) => {
            tracing::info!(%url, images = images.len(), "[FETCH] finished");
            AppEvent::FetchSucceeded { url, images }
        }
        Err(failure) => AppEvent::FetchFailed(failure),
    };

    app_to_ui_tx.send(event).await?;
    Ok(())
}
