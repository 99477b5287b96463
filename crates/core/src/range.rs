//! Wheel rotation range: validated before any command is synthesized.
//!
//! # Bounds
//!
//! ## Rotation range
//! - **Range**: 40 – 900 degrees
//! - **Standard**: 240 degrees, what a restricted wheel exposes
//! - **Max**: 900 degrees, full lock-to-lock travel of every supported model
//! - **Encoding**: 16-bit little-endian for G25/G27/G29/DFGT/G920; the
//!   Driving Force Pro picks a 200 or 900 degree profile and emulates anything
//!   narrower with a ramp limiter
//!
//! ## Settings
//! [`WheelSettings`] carries the two ranges a run can apply: `full_range` for
//! native mode and `standard_range` for `--restore`.

use crate::error::{Error, Result};
use serde::Serialize;

/// Minimum wheel range accepted.
pub const RANGE_MIN: u16 = 40;
/// Maximum wheel range accepted.
pub const RANGE_MAX: u16 = 900;

/// A rotation range in degrees, guaranteed within [`RANGE_MIN`]..=[`RANGE_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct WheelRange(u16);

impl WheelRange {
    /// Range a restricted wheel reports.
    pub const STANDARD: WheelRange = WheelRange(240);
    /// Full range of every supported wheel.
    pub const MAX: WheelRange = WheelRange(RANGE_MAX);

    /// Validate a range in degrees.
    pub fn new(degrees: u16) -> Result<Self> {
        if !(RANGE_MIN..=RANGE_MAX).contains(&degrees) {
            return Err(Error::OutOfRange {
                field: "wheel_range",
                value: degrees as u32,
                min: RANGE_MIN as u32,
                max: RANGE_MAX as u32,
            });
        }
        Ok(Self(degrees))
    }

    pub fn degrees(&self) -> u16 {
        self.0
    }
}

impl Default for WheelRange {
    fn default() -> Self {
        Self::MAX
    }
}

impl std::fmt::Display for WheelRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Ranges applied by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelSettings {
    /// Range set when switching to full range.
    pub full_range: WheelRange,
    /// Range set when restoring a native wheel.
    pub standard_range: WheelRange,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            full_range: WheelRange::MAX,
            standard_range: WheelRange::STANDARD,
        }
    }
}
