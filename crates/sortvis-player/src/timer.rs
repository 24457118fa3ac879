//! Recurring timers for auto-advance.
//!
//! The engine never touches a clock itself. It asks a [`Scheduler`] to start
//! or cancel a recurring timer identified by a [`TimerId`], and the host
//! delivers each tick back to [`Player::tick`](crate::Player::tick) with
//! that id. Ids are never reused, so a tick from a cancelled timer can always
//! be told apart from a live one.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Identity of one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Host-side timer facility.
pub trait Scheduler {
    /// Start delivering `id` every `interval`, first one `interval` from now.
    fn start(&mut self, id: TimerId, interval: Duration);

    /// Stop delivering `id`. Unknown ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Scheduler backed by tokio tasks.
///
/// Each timer is a spawned task that sends its id down an unbounded channel
/// on every period. Must be used from within a tokio runtime.
pub struct TokioScheduler {
    ticks: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its ticks arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (ticks, rx) = mpsc::unbounded_channel();
        (
            Self {
                ticks,
                tasks: HashMap::new(),
            },
            rx,
        )
    }

    /// Number of timers currently running.
    pub fn active(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn start(&mut self, id: TimerId, interval: Duration) {
        let ticks = self.ticks.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if ticks.send(id).is_err() {
                    break;
                }
            }
        });

        if let Some(old) = self.tasks.insert(id, task) {
            old.abort();
        }
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
