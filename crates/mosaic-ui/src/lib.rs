use std::thread::JoinHandle;

use kanal::{AsyncReceiver, AsyncSender};
use mosaic_types::{AppEvent, UiEvent};
use tokio_util::sync::CancellationToken;

pub mod events;
pub mod render;
pub mod state;

pub use events::{UiFlow, handle_events};
pub use state::{Controls, UiState};

/// Interactive loop: sole consumer of the app-to-ui queue and sole owner
/// of the gallery and slideshow state.
///
/// `draw` runs on explicit render requests, and after every visible change
/// when `render_on_update` is set.
pub async fn ui_loop<D>(
    mut state: UiState,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
    render_on_update: bool,
    mut draw: D,
) -> anyhow::Result<()>
where
    D: FnMut(&UiState),
{
    tracing::info!("[UI] loop started");
    draw(&state);

    loop {
        let event = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("[UI] cancelled");
                break;
            }
            event = app_to_ui_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => {
                    tracing::warn!("[UI] app queue closed");
                    break;
                }
            },
        };

        let forced = matches!(event, AppEvent::UiEvent(UiEvent::Render));
        match handle_events(event, &mut state, &ui_to_app_tx).await? {
            UiFlow::Redraw if render_on_update || forced => draw(&state),
            UiFlow::Redraw | UiFlow::Unchanged => {}
            UiFlow::Exit => {
                // let the backend wind down too
                if let Err(e) = ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await {
                    tracing::debug!("[UI] backend already gone: {e}");
                }
                break;
            }
        }
    }

    state.slideshow.stop();
    tracing::info!("[UI] loop stopped");
    Ok(())
}

/// Run [`ui_loop`] on a dedicated thread with its own current-thread runtime,
/// printing frames to stdout.
pub fn spawn_ui_thread(
    state: UiState,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
    render_on_update: bool,
) -> std::io::Result<JoinHandle<anyhow::Result<()>>> {
    std::thread::Builder::new()
        .name("mosaic-ui".to_string())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;

            runtime.block_on(ui_loop(
                state,
                app_to_ui_rx,
                ui_to_app_tx,
                cancel,
                render_on_update,
                |state| println!("{}", render::frame(state)),
            ))
        })
}

#[cfg(test)]
mod tests;
