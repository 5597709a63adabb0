//! Shared application state handed to the control surface

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{info, warn};

use super::{Control, Frame};
use crate::placement::{Placement, WindowSize};

/// Capacity of the control request queue
const CONTROL_QUEUE: usize = 32;

/// A button press travelling to the countdown task, with a reply slot for
/// the resulting frame
#[derive(Debug)]
pub struct ControlRequest {
    pub control: Control,
    pub reply: oneshot::Sender<Frame>,
}

/// Main application state.
///
/// The countdown itself is owned by the countdown task; this holds the
/// handles used to talk to it and to observe what it renders.
#[derive(Debug)]
pub struct AppState {
    /// Queue into the countdown task
    pub control_tx: mpsc::Sender<ControlRequest>,
    /// Render sink: latest frame published by the countdown task
    pub frame_tx: watch::Sender<Frame>,
    /// Keep the receiver alive to prevent channel closure
    pub _frame_rx: watch::Receiver<Frame>,
    /// Current window placement
    pub placement: Arc<Mutex<Placement>>,
    /// Fired once when the window is closed
    pub shutdown_tx: broadcast::Sender<()>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create the state and the receiving end of the control queue
    pub fn new(
        port: u16,
        host: String,
        initial_frame: Frame,
        placement: Placement,
    ) -> (Self, mpsc::Receiver<ControlRequest>) {
        let (control_tx, control_rx) = mpsc::channel(CONTROL_QUEUE);
        let (frame_tx, frame_rx) = watch::channel(initial_frame);
        let (shutdown_tx, _) = broadcast::channel(1);

        let state = Self {
            control_tx,
            frame_tx,
            _frame_rx: frame_rx,
            placement: Arc::new(Mutex::new(placement)),
            shutdown_tx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        };
        (state, control_rx)
    }

    /// Forward a button press to the countdown task and wait for the frame
    pub async fn send_control(&self, control: Control) -> Result<Frame, String> {
        let (reply, reply_rx) = oneshot::channel();
        self.control_tx
            .send(ControlRequest { control, reply })
            .await
            .map_err(|_| "Countdown task is not running".to_string())?;

        let frame = reply_rx
            .await
            .map_err(|_| "Countdown task dropped the request".to_string())?;

        self.record_action(control.as_str());
        Ok(frame)
    }

    /// Publish a frame to everyone watching the render sink
    pub fn publish_frame(&self, frame: Frame) {
        self.frame_tx.send_replace(frame);
    }

    /// Subscribe to rendered frames
    pub fn subscribe_frames(&self) -> watch::Receiver<Frame> {
        self.frame_tx.subscribe()
    }

    /// Latest rendered frame
    pub fn current_frame(&self) -> Frame {
        self.frame_tx.borrow().clone()
    }

    /// Get current placement
    pub fn get_placement(&self) -> Result<Placement, String> {
        self.placement
            .lock()
            .map(|placement| *placement)
            .map_err(|e| format!("Failed to lock placement: {}", e))
    }

    /// Recompute the placement for a new window size
    pub fn resize(&self, window: WindowSize) -> Result<Placement, String> {
        let mut placement = self.placement.lock()
            .map_err(|e| format!("Failed to lock placement: {}", e))?;

        let updated = placement.resized(window);
        *placement = updated;
        drop(placement);

        info!(
            "Window resized to {}x{}, moved to {},{}",
            window.width, window.height, updated.origin.x, updated.origin.y
        );
        self.record_action("resize");
        Ok(updated)
    }

    /// Ask the host to close the window and exit
    pub fn request_close(&self) {
        info!("Close requested");
        self.record_action("close");
        if self.shutdown_tx.send(()).is_err() {
            warn!("Nobody is listening for the close request");
        }
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}
