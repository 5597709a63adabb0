//! External collaborators module
//!
//! This module contains the side effects the countdown triggers outside the
//! process, such as playing the alarm sound.

pub mod alert;

// Re-export main types
pub use alert::{default_alarm_path, default_player, AlertSink, SoundAlert};
