//! Render frame published after every state-affecting operation

use serde::{Deserialize, Serialize};

use super::{RunState, TimerState, Urgency};

/// Digit color while the blink phase hides the digits
const HIDDEN_COLOR: &str = "black";

/// Everything the window needs to draw the countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub display: String,
    pub urgency: Urgency,
    pub blink_phase: bool,
    pub run_state: RunState,
    pub digit_color: String,
    pub start_stop_label: String,
    pub start_stop_enabled: bool,
}

impl From<&TimerState> for Frame {
    fn from(timer: &TimerState) -> Self {
        let urgency = timer.urgency();
        let digit_color = if timer.is_expired() && timer.blink_phase() {
            HIDDEN_COLOR
        } else {
            urgency.color()
        };
        let start_stop_label = if timer.is_running() { "Stop" } else { "Start" };

        Self {
            display: timer.display(),
            urgency,
            blink_phase: timer.blink_phase(),
            run_state: timer.run_state(),
            digit_color: digit_color.to_string(),
            start_stop_label: start_stop_label.to_string(),
            start_stop_enabled: !timer.is_expired(),
        }
    }
}
