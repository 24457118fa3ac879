//! Playback engine for sorting traces.
//!
//! States are derived, never stored: no trace means [`PlaybackState::Empty`],
//! a held [`TimerId`] means [`PlaybackState::Playing`], anything else is
//! [`PlaybackState::Paused`]. Every transition out of playing goes through
//! one place that cancels the timer, so at most one timer is ever live.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sortvis_trace::{ingest, Action, Algorithm, Element, Highlight, Step, Trace};
use tracing::debug;

use crate::error::Result;
use crate::frame::Frame;
use crate::timer::{Scheduler, TimerId};

/// Slowest rate level (8x the base interval).
pub const MIN_RATE: i32 = -3;

/// Fastest rate level (1/64 of the base interval).
pub const MAX_RATE: i32 = 6;

/// Shortest base interval a player accepts.
pub const MIN_BASE_INTERVAL: Duration = Duration::from_millis(1);

/// Longest base interval a player accepts.
pub const MAX_BASE_INTERVAL: Duration = Duration::from_secs(60);

static NO_HIGHLIGHT: Highlight = Highlight::new();

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// No trace loaded
    Empty,
    /// Trace loaded, cursor fixed
    Paused,
    /// Timer armed, cursor advances on each tick
    Playing,
}

/// Direction for single-step navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

/// What a timer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Tick from a timer that is no longer active; nothing changed.
    Stale,
    /// Cursor moved one step forward.
    Advanced,
    /// Cursor was already on the last step; playback paused there.
    Finished,
}

/// Playback controller owning one trace, its cursor and its timer.
pub struct Player<S: Scheduler> {
    scheduler: S,
    base_interval: Duration,
    trace: Option<Trace>,
    input: Vec<Element>,
    cursor: usize,
    rate: i32,
    timer: Option<TimerId>,
    next_timer: u64,
}

impl<S: Scheduler> Player<S> {
    /// Create an empty player. `base_interval` is clamped to
    /// [`MIN_BASE_INTERVAL`]..=[`MAX_BASE_INTERVAL`].
    pub fn new(scheduler: S, base_interval: Duration) -> Self {
        Self {
            scheduler,
            base_interval: base_interval.clamp(MIN_BASE_INTERVAL, MAX_BASE_INTERVAL),
            trace: None,
            input: Vec::new(),
            cursor: 0,
            rate: 0,
            timer: None,
            next_timer: 0,
        }
    }

    /// Replace the trace and rewind to its first step, paused.
    ///
    /// An empty trace leaves the player in [`PlaybackState::Empty`].
    pub fn load(&mut self, trace: Trace) {
        self.stop_timer();
        self.input = trace.first().map(|s| s.data.clone()).unwrap_or_default();
        self.trace = (!trace.is_empty()).then_some(trace);
        self.cursor = 0;
        debug!(steps = self.total_steps(), "trace loaded");
    }

    /// Ingest `values`, generate the trace for `algorithm` and load it.
    ///
    /// Invalid input is rejected before anything changes.
    pub fn load_input(&mut self, algorithm: Algorithm, values: &[f64]) -> Result<()> {
        let input = ingest(values)?;
        let trace = algorithm.generate(&input);
        self.load(trace);
        self.input = input;
        debug!(%algorithm, len = values.len(), "input loaded");
        Ok(())
    }

    /// Move one step. Pauses playback first; fails at either end.
    pub fn step(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Forward => self.cursor.checked_add(1),
            Direction::Backward => self.cursor.checked_sub(1),
        };
        match target {
            Some(index) => self.seek(index),
            None => {
                self.pause();
                false
            }
        }
    }

    /// Jump to `index`. Pauses playback first; fails when out of bounds.
    pub fn seek(&mut self, index: usize) -> bool {
        if self.trace.is_none() {
            return false;
        }
        self.pause();
        if index >= self.total_steps() {
            return false;
        }
        self.cursor = index;
        true
    }

    /// Set the speed level; interval = base / 2^level.
    ///
    /// Levels are clamped to [`MIN_RATE`]..=[`MAX_RATE`]. A running timer is
    /// replaced so the new interval applies from the next tick on.
    pub fn set_rate(&mut self, level: i32) {
        self.rate = level.clamp(MIN_RATE, MAX_RATE);
        if self.stop_timer() {
            self.arm_timer();
        }
        debug!(rate = self.rate, interval = ?self.interval(), "rate changed");
    }

    /// Play from paused or pause from playing. Returns whether playing.
    ///
    /// Starting from the last step rewinds to the first.
    pub fn toggle_play(&mut self) -> bool {
        match self.state() {
            PlaybackState::Empty => false,
            PlaybackState::Playing => {
                self.pause();
                false
            }
            PlaybackState::Paused => {
                if self.cursor + 1 >= self.total_steps() {
                    self.cursor = 0;
                }
                self.arm_timer();
                true
            }
        }
    }

    /// Stop auto-advance, keeping the cursor.
    pub fn pause(&mut self) {
        if self.stop_timer() {
            debug!(cursor = self.cursor, "paused");
        }
    }

    /// Handle a tick delivered by the scheduler.
    ///
    /// Auto-advance does not wrap: a tick on the last step pauses there.
    pub fn tick(&mut self, id: TimerId) -> Tick {
        if self.timer != Some(id) {
            debug!(?id, "ignoring stale tick");
            return Tick::Stale;
        }
        if self.cursor + 1 < self.total_steps() {
            self.cursor += 1;
            Tick::Advanced
        } else {
            self.stop_timer();
            debug!(cursor = self.cursor, "reached end of trace");
            Tick::Finished
        }
    }

    /// Cancel any timer. Called on teardown and on drop.
    pub fn shutdown(&mut self) {
        self.stop_timer();
    }

    fn arm_timer(&mut self) {
        debug_assert!(self.timer.is_none());
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.scheduler.start(id, self.interval());
        self.timer = Some(id);
        debug!(?id, cursor = self.cursor, "playing");
    }

    fn stop_timer(&mut self) -> bool {
        match self.timer.take() {
            Some(id) => {
                self.scheduler.cancel(id);
                true
            }
            None => false,
        }
    }

    /// Get the current playback state.
    pub fn state(&self) -> PlaybackState {
        match (&self.trace, self.timer) {
            (None, _) => PlaybackState::Empty,
            (Some(_), Some(_)) => PlaybackState::Playing,
            (Some(_), None) => PlaybackState::Paused,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// Cursor position, `None` when empty.
    pub fn cursor(&self) -> Option<usize> {
        self.trace.as_ref().map(|_| self.cursor)
    }

    pub fn total_steps(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }

    pub fn rate(&self) -> i32 {
        self.rate
    }

    /// Auto-advance interval at the current rate.
    pub fn interval(&self) -> Duration {
        let factor = 2u32.pow(self.rate.unsigned_abs());
        if self.rate >= 0 {
            self.base_interval / factor
        } else {
            self.base_interval * factor
        }
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Step under the cursor.
    pub fn current_step(&self) -> Option<&Step> {
        self.trace.as_ref()?.get(self.cursor)
    }

    /// Array to draw: the current step's data, else the loaded input.
    pub fn current_data(&self) -> &[Element] {
        self.current_step().map_or(&self.input, |s| &s.data)
    }

    /// Highlight of the current step, empty when there is none.
    pub fn current_highlight(&self) -> &Highlight {
        self.current_step().map_or(&NO_HIGHLIGHT, |s| &s.highlight)
    }

    pub fn current_action(&self) -> Option<Action> {
        self.current_step().map(|s| s.action)
    }

    /// Position as a fraction of the trace (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        match self.total_steps() {
            0 | 1 => 0.0,
            n => self.cursor as f64 / (n - 1) as f64,
        }
    }

    /// Snapshot of every derived view.
    pub fn frame(&self) -> Frame {
        Frame::from(self)
    }
}

impl<S: Scheduler> Drop for Player<S> {
    fn drop(&mut self) {
        self.stop_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortvis_trace::Role;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Start(TimerId, Duration),
        Cancel(TimerId),
    }

    #[derive(Default)]
    struct Recording {
        calls: Vec<Call>,
    }

    impl Recording {
        fn starts(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, Call::Start(..))).count()
        }

        fn cancels(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, Call::Cancel(_))).count()
        }

        fn last_started(&self) -> Option<(TimerId, Duration)> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::Start(id, d) => Some((*id, *d)),
                _ => None,
            })
        }
    }

    impl Scheduler for Recording {
        fn start(&mut self, id: TimerId, interval: Duration) {
            self.calls.push(Call::Start(id, interval));
        }

        fn cancel(&mut self, id: TimerId) {
            self.calls.push(Call::Cancel(id));
        }
    }

    fn player() -> Player<Recording> {
        Player::new(Recording::default(), Duration::from_millis(400))
    }

    fn loaded(values: &[f64]) -> Player<Recording> {
        let mut p = player();
        p.load_input(Algorithm::BubbleSort, values).unwrap();
        p
    }

    fn active(p: &Player<Recording>) -> TimerId {
        p.scheduler().last_started().unwrap().0
    }

    #[test]
    fn empty_player_is_neutral() {
        let mut p = player();
        assert_eq!(p.state(), PlaybackState::Empty);
        assert_eq!(p.cursor(), None);
        assert!(p.current_step().is_none());
        assert!(p.current_data().is_empty());
        assert!(p.current_highlight().is_empty());
        assert_eq!(p.current_action(), None);

        assert!(!p.toggle_play());
        assert!(!p.step(Direction::Forward));
        assert!(!p.seek(0));
        assert_eq!(p.scheduler().starts(), 0);
    }

    #[test]
    fn load_starts_paused_at_zero() {
        let p = loaded(&[5.0, 3.0, 8.0, 1.0]);
        assert_eq!(p.state(), PlaybackState::Paused);
        assert_eq!(p.cursor(), Some(0));
        assert_eq!(p.current_action(), Some(Action::Initial));
        assert_eq!(p.current_data().len(), 4);
    }

    #[test]
    fn seek_returns_the_trace_step() {
        let mut p = loaded(&[5.0, 3.0, 8.0, 1.0]);
        let trace = p.trace().unwrap().clone();
        for i in 0..trace.len() {
            assert!(p.seek(i));
            assert_eq!(p.current_step(), trace.get(i));
        }
    }

    #[test]
    fn invalid_seek_keeps_cursor() {
        let mut p = loaded(&[2.0, 1.0]);
        assert!(p.seek(2));
        let total = p.total_steps();
        assert!(!p.seek(total));
        assert!(!p.seek(usize::MAX));
        assert_eq!(p.cursor(), Some(2));
    }

    #[test]
    fn step_stops_at_both_ends() {
        let mut p = loaded(&[2.0, 1.0]);
        assert!(!p.step(Direction::Backward));
        assert_eq!(p.cursor(), Some(0));

        let last = p.total_steps() - 1;
        for _ in 0..last {
            assert!(p.step(Direction::Forward));
        }
        assert!(!p.step(Direction::Forward));
        assert_eq!(p.cursor(), Some(last));
        assert_eq!(p.current_action(), Some(Action::Sorted));

        assert!(p.step(Direction::Backward));
        assert_eq!(p.cursor(), Some(last - 1));
    }

    #[test]
    fn navigation_pauses_playback() {
        let mut p = loaded(&[3.0, 2.0, 1.0]);
        assert!(p.toggle_play());
        assert!(p.step(Direction::Forward));
        assert_eq!(p.state(), PlaybackState::Paused);

        assert!(p.toggle_play());
        assert!(!p.seek(999));
        assert_eq!(p.state(), PlaybackState::Paused);
        assert_eq!(p.scheduler().starts(), p.scheduler().cancels());
    }

    #[test]
    fn toggle_from_last_step_rewinds_before_arming() {
        let mut p = loaded(&[3.0, 2.0, 1.0]);
        let last = p.total_steps() - 1;
        p.seek(last);

        assert!(p.toggle_play());
        assert_eq!(p.cursor(), Some(0));
        assert_eq!(p.state(), PlaybackState::Playing);
        assert_eq!(p.scheduler().starts(), 1);
    }

    #[test]
    fn toggle_twice_pauses() {
        let mut p = loaded(&[3.0, 2.0, 1.0]);
        assert!(p.toggle_play());
        assert!(!p.toggle_play());
        assert_eq!(p.state(), PlaybackState::Paused);
        assert_eq!(p.scheduler().calls.len(), 2);
    }

    #[test]
    fn ticks_advance_then_stop_at_end() {
        let mut p = loaded(&[2.0, 1.0]);
        p.toggle_play();
        let id = active(&p);

        let total = p.total_steps();
        for i in 1..total {
            assert_eq!(p.tick(id), Tick::Advanced);
            assert_eq!(p.cursor(), Some(i));
        }
        assert_eq!(p.tick(id), Tick::Finished);
        assert_eq!(p.state(), PlaybackState::Paused);
        assert_eq!(p.cursor(), Some(total - 1));
        assert_eq!(p.scheduler().cancels(), 1);

        // Late tick from the cancelled timer.
        assert_eq!(p.tick(id), Tick::Stale);
        assert_eq!(p.cursor(), Some(total - 1));
    }

    #[test]
    fn set_rate_while_playing_keeps_one_timer() {
        let mut p = loaded(&[4.0, 3.0, 2.0, 1.0]);
        p.toggle_play();
        p.tick(active(&p));

        for level in [1, 2, 3, 0, -1] {
            p.set_rate(level);
            assert!(p.is_playing());
            assert_eq!(p.cursor(), Some(1));
        }

        let s = p.scheduler();
        assert_eq!(s.starts(), 6);
        assert_eq!(s.cancels(), s.starts() - 1);
        assert_eq!(s.last_started().unwrap().1, Duration::from_millis(800));
    }

    #[test]
    fn set_rate_while_paused_arms_nothing() {
        let mut p = loaded(&[2.0, 1.0]);
        p.set_rate(2);
        assert_eq!(p.scheduler().starts(), 0);
        assert_eq!(p.interval(), Duration::from_millis(100));

        p.toggle_play();
        assert_eq!(p.scheduler().last_started().unwrap().1, Duration::from_millis(100));
    }

    #[test]
    fn rate_halves_interval_and_clamps() {
        let mut p = player();
        assert_eq!(p.interval(), Duration::from_millis(400));
        p.set_rate(1);
        assert_eq!(p.interval(), Duration::from_millis(200));
        p.set_rate(-1);
        assert_eq!(p.interval(), Duration::from_millis(800));
        p.set_rate(100);
        assert_eq!(p.rate(), MAX_RATE);
        p.set_rate(-100);
        assert_eq!(p.rate(), MIN_RATE);
    }

    #[test]
    fn base_interval_is_bounded() {
        let mut p = Player::new(Recording::default(), Duration::MAX);
        p.set_rate(MIN_RATE);
        assert_eq!(p.interval(), MAX_BASE_INTERVAL * 8);

        let mut p = Player::new(Recording::default(), Duration::ZERO);
        assert_eq!(p.interval(), MIN_BASE_INTERVAL);
        p.set_rate(MAX_RATE);
        assert!(p.interval() > Duration::ZERO);
    }

    #[test]
    fn old_timer_ticks_are_stale_after_restart() {
        let mut p = loaded(&[3.0, 2.0, 1.0]);
        p.toggle_play();
        let old = active(&p);
        p.set_rate(1);
        let new = active(&p);
        assert_ne!(old, new);

        assert_eq!(p.tick(old), Tick::Stale);
        assert_eq!(p.cursor(), Some(0));
        assert_eq!(p.tick(new), Tick::Advanced);
    }

    #[test]
    fn load_while_playing_cancels_first() {
        let mut p = loaded(&[3.0, 2.0, 1.0]);
        p.toggle_play();
        let old = active(&p);
        p.tick(old);

        p.load_input(Algorithm::QuickSort, &[9.0, 8.0]).unwrap();
        assert_eq!(p.scheduler().calls.last(), Some(&Call::Cancel(old)));
        assert_eq!(p.state(), PlaybackState::Paused);
        assert_eq!(p.cursor(), Some(0));
        assert_eq!(p.tick(old), Tick::Stale);
    }

    #[test]
    fn invalid_input_leaves_state_untouched() {
        let mut p = loaded(&[3.0, 2.0, 1.0]);
        p.seek(2);
        assert!(p.load_input(Algorithm::ShellSort, &[f64::NAN]).is_err());
        assert_eq!(p.cursor(), Some(2));
        assert_eq!(p.current_data().len(), 3);
    }

    #[test]
    fn loading_an_empty_trace_empties_the_player() {
        let mut p = loaded(&[3.0, 2.0, 1.0]);
        p.load(Trace::default());
        assert_eq!(p.state(), PlaybackState::Empty);
        assert!(p.current_data().is_empty());
    }

    #[test]
    fn empty_input_still_loads_two_steps() {
        let mut p = player();
        p.load_input(Algorithm::InsertionSort, &[]).unwrap();
        assert_eq!(p.total_steps(), 2);
        assert!(p.current_data().is_empty());
        assert!(p.step(Direction::Forward));
        assert_eq!(p.current_action(), Some(Action::Sorted));
    }

    #[test]
    fn highlight_view_tracks_cursor() {
        let mut p = loaded(&[2.0, 1.0]);
        assert!(p.current_highlight().is_empty());
        p.seek(1);
        assert_eq!(p.current_highlight().get(&0), Some(&Role::Compared));
        assert_eq!(p.current_highlight().get(&1), Some(&Role::Compared));
    }

    #[test]
    fn drop_cancels_active_timer() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Shared(Rc<RefCell<Vec<Call>>>);
        impl Scheduler for Shared {
            fn start(&mut self, id: TimerId, interval: Duration) {
                self.0.borrow_mut().push(Call::Start(id, interval));
            }
            fn cancel(&mut self, id: TimerId) {
                self.0.borrow_mut().push(Call::Cancel(id));
            }
        }

        let calls = Rc::new(RefCell::new(Vec::new()));
        {
            let mut p = Player::new(Shared(Rc::clone(&calls)), Duration::from_millis(400));
            p.load_input(Algorithm::SelectionSort, &[2.0, 1.0]).unwrap();
            p.toggle_play();
        }
        assert_eq!(calls.borrow().last(), Some(&Call::Cancel(TimerId(0))));
    }

    #[test]
    fn progress_spans_zero_to_one() {
        let mut p = loaded(&[2.0, 1.0]);
        assert_eq!(p.progress(), 0.0);
        let last = p.total_steps() - 1;
        p.seek(last);
        assert_eq!(p.progress(), 1.0);
    }
}
