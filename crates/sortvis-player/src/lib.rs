//! Sortvis Playback
//!
//! Step-by-step playback of sorting traces with forward/backward navigation
//! and timer-driven auto-advance.
//!
//! # Architecture
//!
//! - **Playback**: state machine over one trace (empty, paused, playing)
//! - **Timer**: scheduler seam plus a tokio-backed implementation
//! - **Session**: player, tick task and frame feed on one event loop
//! - **Frame**: derived views handed to renderers
//! - **Server**: REST and WebSocket controls
//!
//! # Usage
//!
//! ```ignore
//! let session = Session::from_config(&PlayerConfig::from_env()?).await?;
//! session.toggle_play().await;
//!
//! let server = PlayerServer::new(session);
//! server.serve(config.addr).await?;
//! ```

mod config;
mod error;
mod frame;
mod playback;
mod server;
mod session;
mod timer;

pub use config::{PlayerConfig, DEFAULT_BASE_INTERVAL};
pub use error::{Error, Result};
pub use frame::{Frame, SWAP_TRANSITION_MS};
pub use playback::{Direction, PlaybackState, Player, Tick, MAX_RATE, MIN_RATE};
pub use server::PlayerServer;
pub use session::Session;
pub use timer::{Scheduler, TimerId, TokioScheduler};
