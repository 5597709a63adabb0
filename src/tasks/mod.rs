//! Background tasks module
//!
//! This module contains background tasks that run alongside the control surface.

pub mod countdown_timer;
pub mod render_log;

// Re-export main functions
pub use countdown_timer::countdown_timer_task;
pub use render_log::render_log_task;
