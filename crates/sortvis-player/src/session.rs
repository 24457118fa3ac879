//! A player bound to the tokio timer host.
//!
//! Commands and timer ticks both mutate the player under the same lock, so no
//! two mutations interleave. After every change a fresh [`Frame`] is
//! published on a watch channel for renderers to pick up.

use std::sync::Arc;
use std::time::Duration;

use sortvis_trace::{Algorithm, Trace};
use tokio::sync::{mpsc, watch, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::PlayerConfig;
use crate::error::Result;
use crate::frame::Frame;
use crate::playback::{Direction, Player, Tick};
use crate::timer::{TimerId, TokioScheduler};

type SharedPlayer = Arc<RwLock<Player<TokioScheduler>>>;

/// Playback session: one player, its timer task and its frame feed.
pub struct Session {
    player: SharedPlayer,
    frames: watch::Sender<Frame>,
    ticker: JoinHandle<()>,
}

impl Session {
    /// Create an empty session. Must be called within a tokio runtime.
    pub fn new(base_interval: Duration) -> Self {
        let (scheduler, ticks) = TokioScheduler::new();
        let player = Player::new(scheduler, base_interval);
        let (frames, _) = watch::channel(player.frame());
        let player = Arc::new(RwLock::new(player));

        let ticker = tokio::spawn(drive_ticks(
            Arc::clone(&player),
            frames.clone(),
            ticks,
        ));

        Self {
            player,
            frames,
            ticker,
        }
    }

    /// Create a session with the configured startup trace loaded.
    pub async fn from_config(config: &PlayerConfig) -> Result<Self> {
        let session = Self::new(config.base_interval);
        session.load_input(config.algorithm, &config.values).await?;
        Ok(session)
    }

    /// Apply `f` to the player and publish the resulting frame.
    async fn apply<R>(&self, f: impl FnOnce(&mut Player<TokioScheduler>) -> R) -> (R, Frame) {
        let mut player = self.player.write().await;
        let out = f(&mut *player);
        let frame = player.frame();
        self.frames.send_replace(frame.clone());
        (out, frame)
    }

    pub async fn load(&self, trace: Trace) -> Frame {
        self.apply(|p| p.load(trace)).await.1
    }

    pub async fn load_input(&self, algorithm: Algorithm, values: &[f64]) -> Result<Frame> {
        let (result, frame) = self.apply(|p| p.load_input(algorithm, values)).await;
        result.map(|_| frame)
    }

    pub async fn toggle_play(&self) -> Frame {
        self.apply(|p| p.toggle_play()).await.1
    }

    pub async fn pause(&self) -> Frame {
        self.apply(|p| p.pause()).await.1
    }

    /// Returns whether the cursor moved, plus the frame after the attempt.
    pub async fn step(&self, direction: Direction) -> (bool, Frame) {
        self.apply(|p| p.step(direction)).await
    }

    /// Returns whether the cursor moved, plus the frame after the attempt.
    pub async fn seek(&self, index: usize) -> (bool, Frame) {
        self.apply(|p| p.seek(index)).await
    }

    pub async fn set_rate(&self, level: i32) -> Frame {
        self.apply(|p| p.set_rate(level)).await.1
    }

    pub async fn frame(&self) -> Frame {
        self.player.read().await.frame()
    }

    /// Copy of the loaded trace.
    pub async fn trace(&self) -> Option<Trace> {
        self.player.read().await.trace().cloned()
    }

    /// Receive a frame after every state change.
    pub fn subscribe(&self) -> watch::Receiver<Frame> {
        self.frames.subscribe()
    }

    /// Stop playback and the tick task.
    pub async fn shutdown(&self) {
        self.apply(|p| p.shutdown()).await;
        self.ticker.abort();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.ticker.abort();
        if let Ok(mut player) = self.player.try_write() {
            player.shutdown();
        }
    }
}

async fn drive_ticks(
    player: SharedPlayer,
    frames: watch::Sender<Frame>,
    mut ticks: mpsc::UnboundedReceiver<TimerId>,
) {
    while let Some(id) = ticks.recv().await {
        let mut player = player.write().await;
        match player.tick(id) {
            Tick::Stale => {}
            Tick::Advanced | Tick::Finished => {
                frames.send_replace(player.frame());
            }
        }
    }
    debug!("tick channel closed");
}
