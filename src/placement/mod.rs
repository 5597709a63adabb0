//! Window placement module
//!
//! Anchors the countdown window to a corner of a monitor's work area.

pub mod corner;
pub mod monitor;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

// Re-export main types
pub use corner::{resolve, Corner};
pub use monitor::{MonitorLayout, MonitorSource, Origin, WindowSize, WorkArea};

/// A resolved placement: where the window goes and why
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub monitor: usize,
    pub anchor: Corner,
    pub work_area: WorkArea,
    pub window: WindowSize,
    pub origin: Origin,
}

impl Placement {
    /// Look up the work area of `monitor` and anchor the window in it
    pub fn locate(
        source: &impl MonitorSource,
        monitor: usize,
        anchor: Corner,
        window: WindowSize,
    ) -> Result<Self> {
        let work_area = source.work_area(monitor)?;
        Ok(Self::new(monitor, anchor, work_area, window))
    }

    pub fn new(monitor: usize, anchor: Corner, work_area: WorkArea, window: WindowSize) -> Self {
        let origin = resolve(work_area, window, anchor);
        debug!(
            "Placing {}x{} window at {},{} ({} of display {})",
            window.width, window.height, origin.x, origin.y, anchor, monitor
        );
        Self {
            monitor,
            anchor,
            work_area,
            window,
            origin,
        }
    }

    /// Recompute the origin after the window changed size
    pub fn resized(&self, window: WindowSize) -> Self {
        Self::new(self.monitor, self.anchor, self.work_area, window)
    }
}
