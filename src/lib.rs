//! Corner Countdown - an always-on-top countdown timer for a display corner
//!
//! This library provides the countdown engine (run/pause/reset, urgency and
//! the expiry alert cadence), the corner placement resolver, and the host
//! glue that drives them: a tick scheduler task, an alert sink and an HTTP
//! control surface standing in for the window's buttons.

pub mod config;
pub mod error;
pub mod state;
pub mod placement;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, Settings};
pub use error::{Error, Result};
pub use state::{AppState, Shell, TimerState};
pub use placement::{resolve, Corner, Placement};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
