//! Practice countdown timer

use std::fmt;

use crate::domain::recording::Duration;

/// Timer run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Paused,
    Expired,
}

/// Countdown timer for the prep window before recording.
///
/// Tick-driven so callers own the clock: the CLI feeds it elapsed
/// milliseconds between display refreshes. Pause and resume exist only
/// here; the submission flow never pauses its elapsed counter.
#[derive(Debug, Clone)]
pub struct PracticeTimer {
    remaining_ms: u64,
    state: TimerState,
}

impl PracticeTimer {
    /// Create a running timer for the given duration
    pub fn new(duration: Duration) -> Self {
        Self {
            remaining_ms: duration.as_millis(),
            state: TimerState::Running,
        }
    }

    /// Current run state
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Remaining time in whole seconds (rounded up)
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_ms.div_ceil(1000)
    }

    /// Whether the countdown has reached zero
    pub fn is_expired(&self) -> bool {
        self.state == TimerState::Expired
    }

    /// Advance the countdown. Ignored while paused or expired.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if self.state != TimerState::Running {
            return;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.state = TimerState::Expired;
        }
    }

    /// Pause the countdown
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Resume a paused countdown
    pub fn resume(&mut self) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
        }
    }

    /// Toggle between running and paused
    pub fn toggle(&mut self) {
        match self.state {
            TimerState::Running => self.pause(),
            TimerState::Paused => self.resume(),
            TimerState::Expired => {}
        }
    }
}

impl fmt::Display for PracticeTimer {
    /// Remaining time as mm:ss
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.remaining_secs();
        write!(f, "{:02}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timer_is_running() {
        let timer = PracticeTimer::new(Duration::from_secs(120));
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_secs(), 120);
        assert!(!timer.is_expired());
    }

    #[test]
    fn tick_counts_down() {
        let mut timer = PracticeTimer::new(Duration::from_secs(10));
        timer.tick(3000);
        assert_eq!(timer.remaining_secs(), 7);
    }

    #[test]
    fn expires_at_zero() {
        let mut timer = PracticeTimer::new(Duration::from_secs(2));
        timer.tick(2000);
        assert!(timer.is_expired());
    }

    #[test]
    fn does_not_underflow() {
        let mut timer = PracticeTimer::new(Duration::from_secs(1));
        timer.tick(10_000);
        assert!(timer.is_expired());
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn pause_freezes_countdown() {
        let mut timer = PracticeTimer::new(Duration::from_secs(10));
        timer.pause();
        timer.tick(5000);
        assert_eq!(timer.remaining_secs(), 10);
        assert_eq!(timer.state(), TimerState::Paused);
    }

    #[test]
    fn resume_continues_countdown() {
        let mut timer = PracticeTimer::new(Duration::from_secs(10));
        timer.pause();
        timer.resume();
        timer.tick(1000);
        assert_eq!(timer.remaining_secs(), 9);
    }

    #[test]
    fn toggle_flips_state() {
        let mut timer = PracticeTimer::new(Duration::from_secs(10));
        timer.toggle();
        assert_eq!(timer.state(), TimerState::Paused);
        timer.toggle();
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn toggle_after_expiry_is_noop() {
        let mut timer = PracticeTimer::new(Duration::from_secs(1));
        timer.tick(1000);
        timer.toggle();
        assert!(timer.is_expired());
    }

    #[test]
    fn display_is_mm_ss() {
        let timer = PracticeTimer::new(Duration::from_secs(90));
        assert_eq!(timer.to_string(), "01:30");

        let timer = PracticeTimer::new(Duration::from_secs(5));
        assert_eq!(timer.to_string(), "00:05");
    }
}
