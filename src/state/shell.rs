//! Host shell: owns the countdown, its single pending callback and the alert sink

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, trace};

use super::{Frame, Tick, TimerState};
use crate::services::AlertSink;

/// User actions coming from the window buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Control {
    /// The modal Start/Stop button
    StartStop,
    Start,
    Stop,
    Reset,
}

impl Control {
    /// Name recorded as the last action
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::StartStop => "start-stop",
            Control::Start => "start",
            Control::Stop => "stop",
            Control::Reset => "reset",
        }
    }
}

/// Which callback is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// One-second countdown tick
    Tick,
    /// Half-interval blink after expiry
    Blink,
}

/// A scheduled callback, tagged with the epoch it was armed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    pub epoch: u64,
    pub cadence: Cadence,
    pub deadline: Instant,
}

/// At most one pending callback. Arming or cancelling bumps the epoch so a
/// callback armed earlier can never be mistaken for the current one.
#[derive(Debug, Default)]
pub struct Schedule {
    epoch: u64,
    pending: Option<Pending>,
}

impl Schedule {
    /// Replace whatever is pending with a new callback
    pub fn arm(&mut self, cadence: Cadence, delay: Duration) -> u64 {
        self.epoch += 1;
        self.pending = Some(Pending {
            epoch: self.epoch,
            cadence,
            deadline: Instant::now() + delay,
        });
        self.epoch
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!("Cancelled pending {:?} (epoch {})", pending.cadence, pending.epoch);
        }
        self.epoch += 1;
    }

    /// Consume the pending callback if `epoch` still refers to it
    pub fn take(&mut self, epoch: u64) -> Option<Cadence> {
        match self.pending {
            Some(pending) if pending.epoch == epoch => {
                self.pending = None;
                Some(pending.cadence)
            }
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }
}

/// The single owner of the countdown state.
///
/// Every state-affecting call returns the [`Frame`] to render.
pub struct Shell<A> {
    timer: TimerState,
    schedule: Schedule,
    alert: A,
    tick_interval: Duration,
}

impl<A: AlertSink> Shell<A> {
    pub fn new(timer: TimerState, alert: A, tick_interval: Duration) -> Self {
        Self {
            timer,
            schedule: Schedule::default(),
            alert,
            tick_interval,
        }
    }

    /// Handle a button press
    pub fn apply(&mut self, control: Control) -> Frame {
        match control {
            Control::StartStop => {
                if self.timer.is_running() {
                    self.stop();
                } else {
                    self.start();
                }
            }
            Control::Start => self.start(),
            Control::Stop => self.stop(),
            Control::Reset => self.reset(),
        }
        self.frame()
    }

    fn start(&mut self) {
        match self.timer.start() {
            Ok(()) => {
                self.schedule.arm(Cadence::Tick, self.tick_interval);
            }
            Err(e) => debug!("Ignoring start request: {}", e),
        }
    }

    fn stop(&mut self) {
        match self.timer.stop() {
            Ok(()) => self.schedule.cancel(),
            Err(e) => debug!("Ignoring stop request: {}", e),
        }
    }

    fn reset(&mut self) {
        self.schedule.cancel();
        self.timer.reset();
    }

    /// Run the callback armed in `epoch`. Stale epochs are ignored and
    /// return `None`.
    pub fn fire(&mut self, epoch: u64) -> Option<Frame> {
        let Some(cadence) = self.schedule.take(epoch) else {
            trace!("Dropping stale callback from epoch {}", epoch);
            return None;
        };

        match cadence {
            Cadence::Tick => match self.timer.tick() {
                Tick::Counted => {
                    self.schedule.arm(Cadence::Tick, self.tick_interval);
                }
                Tick::Expired => {
                    info!("Time is up, raising alert");
                    self.alert.play_alert();
                    self.schedule.arm(Cadence::Blink, self.blink_interval());
                }
                Tick::Ignored => {}
            },
            Cadence::Blink => {
                if self.timer.blink() {
                    self.schedule.arm(Cadence::Blink, self.blink_interval());
                }
            }
        }

        Some(self.frame())
    }

    pub fn frame(&self) -> Frame {
        Frame::from(&self.timer)
    }

    pub fn pending(&self) -> Option<Pending> {
        self.schedule.pending()
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn blink_interval(&self) -> Duration {
        self.tick_interval / 2
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;
    use crate::state::{RunState, Urgency};

    #[derive(Clone, Default)]
    struct CountingAlert(Arc<AtomicUsize>);

    impl AlertSink for CountingAlert {
        fn play_alert(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn shell(minutes: u32, seconds: u32) -> (Shell<CountingAlert>, Arc<AtomicUsize>) {
        let alert = CountingAlert::default();
        let count = Arc::clone(&alert.0);
        let timer = TimerState::configure(minutes, seconds).unwrap();
        (Shell::new(timer, alert, Duration::from_secs(1)), count)
    }

    fn fire_pending(shell: &mut Shell<CountingAlert>) -> Frame {
        let pending = shell.pending().expect("a callback should be pending");
        shell.fire(pending.epoch).expect("pending callback should fire")
    }

    #[test]
    fn start_arms_the_tick_cadence() {
        let (mut shell, _) = shell(0, 5);
        assert!(shell.pending().is_none());

        let frame = shell.apply(Control::StartStop);
        assert_eq!(frame.run_state, RunState::Running);
        assert_eq!(shell.pending().map(|p| p.cadence), Some(Cadence::Tick));
    }

    #[test]
    fn two_second_countdown_alerts_once_and_switches_to_blink() {
        let (mut shell, alerts) = shell(0, 2);
        shell.apply(Control::Start);

        let frame = fire_pending(&mut shell);
        assert_eq!(frame.display, "00:01");
        assert_eq!(alerts.load(Ordering::SeqCst), 0);

        let frame = fire_pending(&mut shell);
        assert_eq!(frame.run_state, RunState::Expired);
        assert_eq!(alerts.load(Ordering::SeqCst), 1);
        assert_eq!(shell.pending().map(|p| p.cadence), Some(Cadence::Blink));

        for _ in 0..4 {
            let frame = fire_pending(&mut shell);
            assert_eq!(frame.display, "00:00");
        }
        assert_eq!(alerts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stale_tick_after_stop_is_a_no_op() {
        let (mut shell, _) = shell(1, 0);
        shell.apply(Control::Start);
        let stale = shell.pending().unwrap().epoch;

        shell.apply(Control::StartStop);
        assert!(shell.pending().is_none());
        assert_eq!(shell.fire(stale), None);
        assert_eq!(shell.timer().display(), "01:00");
    }

    #[test]
    fn stale_tick_after_restart_does_not_double_count() {
        let (mut shell, _) = shell(1, 0);
        shell.apply(Control::Start);
        let stale = shell.pending().unwrap().epoch;
        shell.apply(Control::Stop);
        shell.apply(Control::Start);

        assert_eq!(shell.fire(stale), None);
        fire_pending(&mut shell);
        assert_eq!(shell.timer().display(), "00:59");
    }

    #[test]
    fn reset_from_expired_cancels_blinking() {
        let (mut shell, alerts) = shell(0, 1);
        shell.apply(Control::Start);
        fire_pending(&mut shell);
        fire_pending(&mut shell);
        let stale_blink = shell.pending().unwrap().epoch;

        let frame = shell.apply(Control::Reset);
        assert_eq!(frame.run_state, RunState::Idle);
        assert_eq!(frame.display, "00:01");
        assert_eq!(frame.urgency, Urgency::Normal);
        assert!(!frame.blink_phase);
        assert!(shell.pending().is_none());

        assert_eq!(shell.fire(stale_blink), None);
        assert!(!shell.frame().blink_phase);
        assert_eq!(alerts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn start_while_expired_is_ignored() {
        let (mut shell, _) = shell(0, 1);
        shell.apply(Control::Start);
        fire_pending(&mut shell);
        let blink = shell.pending().unwrap();

        let frame = shell.apply(Control::StartStop);
        assert_eq!(frame.run_state, RunState::Expired);
        assert_eq!(shell.pending(), Some(blink));
    }

    #[test]
    fn blink_runs_at_half_the_tick_interval() {
        let (shell, _) = shell(0, 1);
        assert_eq!(shell.blink_interval(), Duration::from_millis(500));
    }
}
