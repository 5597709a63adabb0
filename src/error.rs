//! Error types shared across the countdown engine, placement and configuration

use thiserror::Error;

use crate::state::RunState;

/// Errors raised by configuration, placement and the countdown state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A numeric setting fell outside its allowed range (minutes, seconds, sizes)
    #[error("'{field}' is {value}, outside the allowed range 0..{max}")]
    InvalidRange {
        field: &'static str,
        value: i64,
        max: i64,
    },

    /// The corner anchor token was not one of the four known corners
    #[error("position '{0}' must be one of: 'tl', 'tr', 'bl' or 'br'")]
    InvalidAnchor(String),

    /// A monitor work area could not be parsed or is degenerate
    #[error("invalid monitor work area '{0}', expected LEFT,TOP,RIGHT,BOTTOM")]
    InvalidWorkArea(String),

    /// The requested display does not exist
    #[error("display {index} is outside the allowed range 1..{count}")]
    InvalidMonitorIndex { index: usize, count: usize },

    /// start/stop requested in a state that does not allow it
    #[error("cannot {action} the countdown while it is {state}")]
    InvalidTransition {
        action: &'static str,
        state: RunState,
    },
}

/// Convenience result alias
pub type Result<T> = std::result::Result<T, Error>;
