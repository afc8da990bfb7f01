//! Data models for scan coordinates and device positions
//!
//! This module provides:
//! - `ScanPoint`: a plane coordinate emitted by the traversal strategies
//! - `Position`: the 3-axis position tracked by the stage driver

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single XY coordinate on the scan plane.
///
/// Produced by the pattern core; consumed by the stage driver, which
/// supplies the Z axis from its own state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanPoint {
    /// X-axis coordinate
    pub x: f64,
    /// Y-axis coordinate
    pub y: f64,
}

impl ScanPoint {
    /// Create a new scan point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for ScanPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for ScanPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{:.3} Y:{:.3}", self.x, self.y)
    }
}

/// Device-side 3-axis position as reported by the stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Position {
    /// Create a new position with X, Y, Z coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The XY projection of this position
    pub fn plane(&self) -> ScanPoint {
        ScanPoint::new(self.x, self.y)
    }

    /// This position with the Z axis replaced
    pub fn with_z(&self, z: f64) -> Self {
        Self { z, ..*self }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{:.3} Y:{:.3} Z:{:.3}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_point_display() {
        let p = ScanPoint::new(1.5, -2.0);
        assert_eq!(p.to_string(), "X:1.500 Y:-2.000");
    }

    #[test]
    fn test_position_plane_projection() {
        let pos = Position::new(3.0, 4.0, 12.5);
        assert_eq!(pos.plane(), ScanPoint::new(3.0, 4.0));
        assert_eq!(pos.with_z(0.0), Position::new(3.0, 4.0, 0.0));
    }
}
