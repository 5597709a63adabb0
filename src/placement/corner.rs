//! Corner anchors and the pure placement calculation

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{Origin, WindowSize, WorkArea};
use crate::error::Error;

/// The four corners a window can be anchored to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Short command line token
    pub fn token(&self) -> &'static str {
        match self {
            Corner::TopLeft => "tl",
            Corner::TopRight => "tr",
            Corner::BottomLeft => "bl",
            Corner::BottomRight => "br",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Corner {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tl" | "top-left" => Ok(Corner::TopLeft),
            "tr" | "top-right" => Ok(Corner::TopRight),
            "bl" | "bottom-left" => Ok(Corner::BottomLeft),
            "br" | "bottom-right" => Ok(Corner::BottomRight),
            _ => Err(Error::InvalidAnchor(s.to_string())),
        }
    }
}

/// Top-left screen coordinate that puts a `window` of the given size into
/// `anchor`'s corner of `work_area`.
///
/// The result is not clamped: a window larger than the work area ends up
/// partly off-screen.
pub fn resolve(work_area: WorkArea, window: WindowSize, anchor: Corner) -> Origin {
    let width = i32::try_from(window.width).unwrap_or(i32::MAX);
    let height = i32::try_from(window.height).unwrap_or(i32::MAX);

    let (x, y) = match anchor {
        Corner::TopLeft => (work_area.left, work_area.top),
        Corner::TopRight => (work_area.right.saturating_sub(width), work_area.top),
        Corner::BottomLeft => (work_area.left, work_area.bottom.saturating_sub(height)),
        Corner::BottomRight => (
            work_area.right.saturating_sub(width),
            work_area.bottom.saturating_sub(height),
        ),
    };
    Origin { x, y }
}
