//! State management module
//!
//! This module contains the countdown engine, the shell that owns it, and
//! the shared handles used by the control surface.

pub mod app_state;
pub mod frame;
pub mod shell;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, ControlRequest};
pub use frame::Frame;
pub use shell::{Cadence, Control, Pending, Schedule, Shell};
pub use timer_state::{RunState, Tick, TimerState, Urgency, MAX_MINUTES, MAX_SECONDS};
