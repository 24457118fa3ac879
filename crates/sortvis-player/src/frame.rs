//! Renderer-facing snapshot of the player.

use serde::{Deserialize, Serialize};
use sortvis_trace::{Action, Element, Highlight};

use crate::playback::{PlaybackState, Player};
use crate::timer::Scheduler;

/// Transition length for swap steps during playback.
pub const SWAP_TRANSITION_MS: u64 = 300;

/// Everything a renderer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub cursor: Option<usize>,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub rate: i32,
    pub interval_ms: u64,
    pub progress: f64,
    pub action: Option<Action>,
    pub data: Vec<Element>,
    pub highlight: Highlight,
    /// How long bars should take to reach their new place. Non-zero only
    /// for swap steps while playing; everything else snaps.
    pub transition_ms: u64,
}

impl Frame {
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }
}

impl<S: Scheduler> From<&Player<S>> for Frame {
    fn from(player: &Player<S>) -> Self {
        let action = player.current_action();
        let transition_ms = if player.is_playing() && action == Some(Action::Swap) {
            SWAP_TRANSITION_MS
        } else {
            0
        };

        Self {
            cursor: player.cursor(),
            total_steps: player.total_steps(),
            state: player.state(),
            rate: player.rate(),
            interval_ms: player.interval().as_millis() as u64,
            progress: player.progress(),
            action,
            data: player.current_data().to_vec(),
            highlight: player.current_highlight().clone(),
            transition_ms,
        }
    }
}
