//! Monitor geometry: work areas and the monitor layout

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Usable rectangle of a monitor, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkArea {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl WorkArea {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

impl fmt::Display for WorkArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }
}

/// Parses `LEFT,TOP,RIGHT,BOTTOM`
impl FromStr for WorkArea {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidWorkArea(s.to_string());

        let values = s
            .split(',')
            .map(|part| part.trim().parse::<i32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        let [left, top, right, bottom] = values[..] else {
            return Err(invalid());
        };
        if right <= left || bottom <= top {
            return Err(invalid());
        }

        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }
}

/// Rendered size of the countdown window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// Top-left corner of the window on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub x: i32,
    pub y: i32,
}

/// Source of monitor geometry
pub trait MonitorSource {
    fn monitor_count(&self) -> usize;

    /// Work area of the 1-based `index`
    fn work_area(&self, index: usize) -> Result<WorkArea>;
}

/// A fixed list of monitors, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorLayout {
    monitors: Vec<WorkArea>,
}

impl MonitorLayout {
    pub fn new(monitors: Vec<WorkArea>) -> Self {
        Self { monitors }
    }
}

impl MonitorSource for MonitorLayout {
    fn monitor_count(&self) -> usize {
        self.monitors.len()
    }

    fn work_area(&self, index: usize) -> Result<WorkArea> {
        index
            .checked_sub(1)
            .and_then(|i| self.monitors.get(i))
            .copied()
            .ok_or(Error::InvalidMonitorIndex {
                index,
                count: self.monitors.len(),
            })
    }
}
