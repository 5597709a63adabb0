//! Countdown engine: remaining time, run state and urgency

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::{Error, Result};

/// Largest accepted value for the minutes field
pub const MAX_MINUTES: u32 = 99;
/// Largest accepted value for the seconds field
pub const MAX_SECONDS: u32 = 59;

/// Seconds at or below which (with zero minutes) the display turns amber
const WARNING_SECONDS: u32 = 30;
/// Seconds at or below which (with zero minutes) the display turns red
const CRITICAL_SECONDS: u32 = 10;

/// Lifecycle of a single countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Expired,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Expired => "expired",
        };
        f.write_str(name)
    }
}

/// Visual severity derived from the remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    Warning,
    Critical,
}

impl Urgency {
    /// Classify a remaining time. Only the last minute is ever urgent.
    pub fn classify(minutes: u32, seconds: u32) -> Self {
        match (minutes, seconds) {
            (0, s) if s <= CRITICAL_SECONDS => Urgency::Critical,
            (0, s) if s <= WARNING_SECONDS => Urgency::Warning,
            _ => Urgency::Normal,
        }
    }

    /// Digit color used by the window for this urgency
    pub fn color(&self) -> &'static str {
        match self {
            Urgency::Normal => "green2",
            Urgency::Warning => "gold",
            Urgency::Critical => "red",
        }
    }
}

/// What a single tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The countdown was not running
    Ignored,
    /// One second was subtracted
    Counted,
    /// Time ran out on this tick; the alert should be raised
    Expired,
}

/// The countdown engine state.
///
/// Remaining time is a two-field base-60 clock that never goes negative.
/// Mutated only through [`start`](Self::start), [`stop`](Self::stop),
/// [`reset`](Self::reset), [`tick`](Self::tick) and [`blink`](Self::blink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    remaining_minutes: u32,
    remaining_seconds: u32,
    configured_minutes: u32,
    configured_seconds: u32,
    run_state: RunState,
    blink_phase: bool,
    /// Set by the first decrement after configure/reset. Urgency is only
    /// classified once the clock has actually counted.
    counting: bool,
}

impl TimerState {
    /// Create an idle countdown for `minutes:seconds`
    pub fn configure(minutes: u32, seconds: u32) -> Result<Self> {
        check_range("minutes", minutes, MAX_MINUTES)?;
        check_range("seconds", seconds, MAX_SECONDS)?;

        Ok(Self {
            remaining_minutes: minutes,
            remaining_seconds: seconds,
            configured_minutes: minutes,
            configured_seconds: seconds,
            run_state: RunState::Idle,
            blink_phase: false,
            counting: false,
        })
    }

    /// Idle -> Running
    pub fn start(&mut self) -> Result<()> {
        if self.run_state != RunState::Idle {
            return Err(Error::InvalidTransition {
                action: "start",
                state: self.run_state,
            });
        }
        self.run_state = RunState::Running;
        info!("Countdown started at {}", self.display());
        Ok(())
    }

    /// Running -> Idle, keeping the remaining time (pause)
    pub fn stop(&mut self) -> Result<()> {
        if self.run_state != RunState::Running {
            return Err(Error::InvalidTransition {
                action: "stop",
                state: self.run_state,
            });
        }
        self.run_state = RunState::Idle;
        info!("Countdown paused at {}", self.display());
        Ok(())
    }

    /// Any state -> Idle with the configured baseline restored
    pub fn reset(&mut self) {
        self.remaining_minutes = self.configured_minutes;
        self.remaining_seconds = self.configured_seconds;
        self.run_state = RunState::Idle;
        self.blink_phase = false;
        self.counting = false;
        info!("Countdown reset to {}", self.display());
    }

    /// Advance the clock by one second. No effect unless running.
    pub fn tick(&mut self) -> Tick {
        if self.run_state != RunState::Running {
            trace!("Tick ignored while {}", self.run_state);
            return Tick::Ignored;
        }

        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        } else if self.remaining_minutes > 0 {
            self.remaining_minutes -= 1;
            self.remaining_seconds = 59;
        }
        self.counting = true;

        if self.remaining_minutes == 0 && self.remaining_seconds == 0 {
            self.run_state = RunState::Expired;
            info!("Countdown expired");
            return Tick::Expired;
        }

        debug!("Tick: {} ({:?})", self.display(), self.urgency());
        Tick::Counted
    }

    /// Toggle the blink phase. Only has an effect once expired.
    pub fn blink(&mut self) -> bool {
        if self.run_state != RunState::Expired {
            return false;
        }
        self.blink_phase = !self.blink_phase;
        trace!("Blink phase now {}", self.blink_phase);
        true
    }

    /// Urgency of the current remaining time.
    ///
    /// Stays `Normal` until the clock has counted at least once since the
    /// last configure/reset, so a 00:30 countdown turns amber one tick after
    /// start rather than on display.
    pub fn urgency(&self) -> Urgency {
        if !self.counting {
            return Urgency::Normal;
        }
        Urgency::classify(self.remaining_minutes, self.remaining_seconds)
    }

    /// `MM:SS` as shown in the window
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_minutes, self.remaining_seconds)
    }

    pub fn remaining_minutes(&self) -> u32 {
        self.remaining_minutes
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Remaining time in whole seconds
    pub fn total_seconds(&self) -> u32 {
        self.remaining_minutes * 60 + self.remaining_seconds
    }

    pub fn configured(&self) -> (u32, u32) {
        (self.configured_minutes, self.configured_seconds)
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn blink_phase(&self) -> bool {
        self.blink_phase
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn is_expired(&self) -> bool {
        self.run_state == RunState::Expired
    }
}

fn check_range(field: &'static str, value: u32, max: u32) -> Result<()> {
    if value > max {
        return Err(Error::InvalidRange {
            field,
            value: i64::from(value),
            max: i64::from(max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(minutes: u32, seconds: u32) -> TimerState {
        let mut timer = TimerState::configure(minutes, seconds).unwrap();
        timer.start().unwrap();
        timer
    }

    #[test]
    fn configure_rejects_out_of_range_values() {
        assert_eq!(
            TimerState::configure(100, 0),
            Err(Error::InvalidRange { field: "minutes", value: 100, max: 99 })
        );
        assert_eq!(
            TimerState::configure(0, 60),
            Err(Error::InvalidRange { field: "seconds", value: 60, max: 59 })
        );
        assert!(TimerState::configure(99, 59).is_ok());
        assert!(TimerState::configure(0, 0).is_ok());
    }

    #[test]
    fn configure_then_reset_shows_the_same_state() {
        for minutes in 0..=MAX_MINUTES {
            for seconds in 0..=MAX_SECONDS {
                let configured = TimerState::configure(minutes, seconds).unwrap();
                let mut reset = configured.clone();
                reset.reset();
                assert_eq!(configured, reset);
                assert_eq!(configured.display(), reset.display());
            }
        }
    }

    #[test]
    fn tick_borrows_a_minute_when_seconds_run_out() {
        let mut timer = running(2, 0);
        assert_eq!(timer.tick(), Tick::Counted);
        assert_eq!(timer.display(), "01:59");
    }

    #[test]
    fn ticking_from_thirty_seconds_counts_down_to_expiry() {
        let mut timer = running(0, 30);
        for n in 1..30 {
            assert_eq!(timer.tick(), Tick::Counted);
            assert_eq!(timer.total_seconds(), 30 - n);
        }
        assert_eq!(timer.tick(), Tick::Expired);
        assert_eq!(timer.display(), "00:00");
        assert!(timer.is_expired());

        // Expired is terminal for ticks: no further decrement, no underflow
        assert_eq!(timer.tick(), Tick::Ignored);
        assert_eq!(timer.display(), "00:00");
    }

    #[test]
    fn zero_countdown_expires_on_first_tick_without_decrement() {
        let mut timer = running(0, 0);
        assert_eq!(timer.tick(), Tick::Expired);
        assert_eq!(timer.total_seconds(), 0);
    }

    #[test]
    fn two_second_countdown_expires_after_two_ticks() {
        let mut timer = running(0, 2);
        assert_eq!(timer.tick(), Tick::Counted);
        assert_eq!(timer.tick(), Tick::Expired);
    }

    #[test]
    fn ticks_are_ignored_unless_running() {
        let mut timer = TimerState::configure(1, 0).unwrap();
        assert_eq!(timer.tick(), Tick::Ignored);
        assert_eq!(timer.display(), "01:00");

        timer.start().unwrap();
        timer.tick();
        timer.stop().unwrap();
        let paused = timer.clone();
        for _ in 0..10 {
            assert_eq!(timer.tick(), Tick::Ignored);
        }
        assert_eq!(timer, paused);
        assert_eq!(timer.display(), "00:59");
    }

    #[test]
    fn invalid_transitions_are_reported() {
        let mut timer = TimerState::configure(0, 1).unwrap();
        assert_eq!(
            timer.stop(),
            Err(Error::InvalidTransition { action: "stop", state: RunState::Idle })
        );
        timer.start().unwrap();
        assert_eq!(
            timer.start(),
            Err(Error::InvalidTransition { action: "start", state: RunState::Running })
        );
        timer.tick();
        assert!(timer.is_expired());
        assert!(timer.start().is_err());
        assert!(timer.stop().is_err());
    }

    #[test]
    fn classification_thresholds() {
        for seconds in 0..=MAX_SECONDS {
            assert_eq!(Urgency::classify(1, seconds), Urgency::Normal);
            assert_eq!(Urgency::classify(42, seconds), Urgency::Normal);
        }
        for seconds in 0..=10 {
            assert_eq!(Urgency::classify(0, seconds), Urgency::Critical);
        }
        for seconds in 11..=30 {
            assert_eq!(Urgency::classify(0, seconds), Urgency::Warning);
        }
        for seconds in 31..=MAX_SECONDS {
            assert_eq!(Urgency::classify(0, seconds), Urgency::Normal);
        }
    }

    #[test]
    fn urgency_waits_for_the_first_tick() {
        let mut timer = running(0, 30);
        assert_eq!(timer.urgency(), Urgency::Normal);
        timer.tick();
        assert_eq!(timer.urgency(), Urgency::Warning);
    }

    #[test]
    fn urgency_escalates_and_reset_restores_normal() {
        let mut timer = running(0, 12);
        timer.tick();
        assert_eq!(timer.urgency(), Urgency::Warning);
        timer.tick();
        assert_eq!(timer.urgency(), Urgency::Critical);

        timer.reset();
        assert_eq!(timer.urgency(), Urgency::Normal);
        assert_eq!(timer.display(), "00:12");
        assert_eq!(timer.run_state(), RunState::Idle);
    }

    #[test]
    fn blink_only_toggles_after_expiry() {
        let mut timer = running(0, 1);
        assert!(!timer.blink());
        assert!(!timer.blink_phase());

        timer.tick();
        assert!(timer.blink());
        assert!(timer.blink_phase());
        assert!(timer.blink());
        assert!(!timer.blink_phase());
        assert_eq!(timer.display(), "00:00");
    }

    #[test]
    fn reset_from_expired_returns_to_idle_baseline() {
        let mut timer = running(0, 1);
        timer.tick();
        timer.blink();
        timer.reset();

        assert_eq!(timer.run_state(), RunState::Idle);
        assert_eq!(timer.display(), "00:01");
        assert_eq!(timer.urgency(), Urgency::Normal);
        assert!(!timer.blink_phase());
        assert!(!timer.blink());
        assert!(timer.start().is_ok());
    }
}
