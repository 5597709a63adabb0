//! Countdown timer background task

use std::{future, sync::Arc};
use tokio::{sync::mpsc, time::sleep_until};
use tracing::{debug, info, warn};

use crate::{
    services::AlertSink,
    state::{AppState, ControlRequest, Shell},
};

/// Background task that owns the countdown shell.
///
/// Waits on three things at once: shutdown, button presses and the single
/// pending tick/blink deadline. Whatever the shell has pending is re-read on
/// every iteration, so a callback cancelled by stop or reset is dropped
/// before it can fire.
pub async fn countdown_timer_task<A>(
    mut shell: Shell<A>,
    mut control_rx: mpsc::Receiver<ControlRequest>,
    state: Arc<AppState>,
) where
    A: AlertSink + 'static,
{
    info!("Starting countdown timer task");

    let mut shutdown_rx = state.shutdown_tx.subscribe();
    state.publish_frame(shell.frame());

    loop {
        let pending = shell.pending();
        let wake = async move {
            match pending {
                Some(pending) => {
                    sleep_until(pending.deadline).await;
                    pending.epoch
                }
                None => future::pending().await,
            }
        };

        tokio::select! {
            biased;

            _ = shutdown_rx.recv() => {
                info!("Countdown timer task shutting down");
                break;
            }

            request = control_rx.recv() => {
                let Some(ControlRequest { control, reply }) = request else {
                    debug!("Control channel closed, stopping countdown timer task");
                    break;
                };

                debug!("Control request: {:?}", control);
                let frame = shell.apply(control);
                state.publish_frame(frame.clone());
                if reply.send(frame).is_err() {
                    warn!("Control requester went away before the reply");
                }
            }

            epoch = wake => {
                if let Some(frame) = shell.fire(epoch) {
                    state.publish_frame(frame);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use tokio::time::sleep;

    use super::*;
    use crate::{
        placement::{Corner, Placement, WindowSize, WorkArea},
        state::{Control, RunState, TimerState, Urgency},
    };

    #[derive(Clone, Default)]
    struct CountingAlert(Arc<AtomicUsize>);

    impl AlertSink for CountingAlert {
        fn play_alert(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn spawn_countdown(minutes: u32, seconds: u32) -> (Arc<AppState>, Arc<AtomicUsize>) {
        let alert = CountingAlert::default();
        let alerts = Arc::clone(&alert.0);
        let timer = TimerState::configure(minutes, seconds).unwrap();
        let shell = Shell::new(timer, alert, Duration::from_secs(1));

        let placement = Placement::new(
            1,
            Corner::BottomRight,
            WorkArea { left: 0, top: 0, right: 1920, bottom: 1080 },
            WindowSize { width: 198, height: 162 },
        );
        let (state, control_rx) = AppState::new(0, "127.0.0.1".to_string(), shell.frame(), placement);
        let state = Arc::new(state);

        tokio::spawn(countdown_timer_task(shell, control_rx, Arc::clone(&state)));
        (state, alerts)
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_once_per_second() {
        let (state, _) = spawn_countdown(2, 0);
        state.send_control(Control::StartStop).await.unwrap();

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(state.current_frame().display, "01:57");
        assert_eq!(state.current_frame().start_stop_label, "Stop");
    }

    #[tokio::test(start_paused = true)]
    async fn expires_after_two_ticks_and_alerts_once() {
        let (state, alerts) = spawn_countdown(0, 2);
        state.send_control(Control::Start).await.unwrap();

        sleep(Duration::from_millis(2100)).await;
        let frame = state.current_frame();
        assert_eq!(frame.run_state, RunState::Expired);
        assert_eq!(frame.display, "00:00");
        assert_eq!(alerts.load(Ordering::SeqCst), 1);

        // Blink cadence keeps running, the alert does not repeat
        let mut frames = state.subscribe_frames();
        frames.borrow_and_update();
        sleep(Duration::from_millis(600)).await;
        assert!(frames.has_changed().unwrap());
        assert_eq!(alerts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_pending_tick() {
        let (state, _) = spawn_countdown(2, 0);
        state.send_control(Control::Start).await.unwrap();
        sleep(Duration::from_millis(1500)).await;

        let frame = state.send_control(Control::StartStop).await.unwrap();
        assert_eq!(frame.run_state, RunState::Idle);
        assert_eq!(frame.display, "01:59");

        sleep(Duration::from_secs(10)).await;
        assert_eq!(state.current_frame().display, "01:59");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_after_expiry_stops_blinking() {
        let (state, alerts) = spawn_countdown(0, 1);
        state.send_control(Control::Start).await.unwrap();
        sleep(Duration::from_millis(1700)).await;
        assert_eq!(state.current_frame().run_state, RunState::Expired);

        let frame = state.send_control(Control::Reset).await.unwrap();
        assert_eq!(frame.run_state, RunState::Idle);
        assert_eq!(frame.display, "00:01");
        assert_eq!(frame.urgency, Urgency::Normal);

        let mut frames = state.subscribe_frames();
        frames.borrow_and_update();
        sleep(Duration::from_secs(5)).await;
        assert!(!frames.has_changed().unwrap());
        assert!(!state.current_frame().blink_phase);
        assert_eq!(alerts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn close_stops_the_task() {
        let (state, _) = spawn_countdown(1, 0);
        tokio::task::yield_now().await;
        state.request_close();
        sleep(Duration::from_millis(10)).await;

        assert!(state.send_control(Control::Start).await.is_err());
    }
}
