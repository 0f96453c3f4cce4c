use std::sync::Arc;
use std::thread::JoinHandle;

use kanal::{AsyncReceiver, AsyncSender};
use mosaic_types::AppEvent;
use mosaic_ui::{UiState, spawn_ui_thread};
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // progress bursts and ticks
            ui_to_app: kanal::bounded_async(64),  // fetch requests
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Backend loop and stdin watcher on the current runtime
    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks.spawn(watcher_io(
            self.cancel_token.child_token(),
            self.channels.app_to_ui.0.clone(),
        ));

        tasks
    }

    /// Interactive thread; its slideshow ticker runs on `runtime`
    pub fn spawn_ui(&self, runtime: Handle) -> anyhow::Result<JoinHandle<anyhow::Result<()>>> {
        let config = &self.state.config;
        let ui_cancel = self.cancel_token.child_token();

        let state = UiState::new(
            config,
            runtime,
            self.channels.app_to_ui.0.clone(),
            ui_cancel.clone(),
        );

        let handle = spawn_ui_thread(
            state,
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            ui_cancel,
            config.ui.render_on_update,
        )?;
        Ok(handle)
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
