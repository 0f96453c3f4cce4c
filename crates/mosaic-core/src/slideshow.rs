use std::time::Duration;

use kanal::AsyncSender;
use mosaic_types::AppEvent;
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// Start/stop state machine driving periodic slideshow ticks.
///
/// The engine never touches the gallery. Its ticker only posts
/// [`AppEvent::SlideshowTick`] into the interactive queue, stamped with the
/// generation of the run that produced it. The interactive thread applies a
/// tick only while [`SlideshowEngine::accepts`] holds for that generation, so
/// once [`SlideshowEngine::stop`] returns every queued or in-flight tick is
/// suppressed.
pub struct SlideshowEngine {
    state: PlaybackState,
    interval: Duration,
    generation: u64,
    run_token: Option<CancellationToken>,
    parent: CancellationToken,
    runtime: Handle,
    tick_tx: AsyncSender<AppEvent>,
}

impl SlideshowEngine {
    pub fn new(
        interval: Duration,
        runtime: Handle,
        tick_tx: AsyncSender<AppEvent>,
        parent: CancellationToken,
    ) -> Self {
        Self {
            state: PlaybackState::Idle,
            interval,
            generation: 0,
            run_token: None,
            parent,
            runtime,
            tick_tx,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Idle -> Playing. Returns false when already playing.
    pub fn start(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }

        self.generation += 1;
        let token = self.parent.child_token();
        self.runtime.spawn(run_ticker(
            self.generation,
            self.interval,
            token.clone(),
            self.tick_tx.clone(),
        ));
        self.run_token = Some(token);
        self.state = PlaybackState::Playing;

        tracing::info!(generation = self.generation, interval = ?self.interval, "slideshow started");
        true
    }

    /// Playing -> Idle. Returns false when already idle.
    pub fn stop(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }

        if let Some(token) = self.run_token.take() {
            token.cancel();
        }
        self.state = PlaybackState::Idle;

        tracing::info!(generation = self.generation, "slideshow stopped");
        true
    }

    /// Whether a tick from `generation` may still mutate the grid
    pub fn accepts(&self, generation: u64) -> bool {
        self.is_playing() && generation == self.generation
    }
}

impl Drop for SlideshowEngine {
    fn drop(&mut self) {
        if let Some(token) = self.run_token.take() {
            token.cancel();
        }
    }
}

async fn run_ticker(
    generation: u64,
    period: Duration,
    cancel: CancellationToken,
    tick_tx: AsyncSender<AppEvent>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    sent = tick_tx.send(AppEvent::SlideshowTick { generation }) => {
                        if sent.is_err() {
                            tracing::debug!(generation, "tick receiver closed");
                            break;
                        }
                    }
                }
            }
        }
    }

    tracing::trace!(generation, "ticker exited");
}
