//! Axis travel limits
//!
//! Soft bounds enforced on every commanded move. Each axis is checked
//! independently: an out-of-range request on one axis rejects only that
//! axis, the others still move. Homing deliberately bypasses these checks.

use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` travel range for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    /// Lowest allowed value
    pub min: f64,
    /// Highest allowed value
    pub max: f64,
}

impl AxisLimits {
    /// Create a limit range
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the closed range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Travel limits for all stage axes plus the jog step range.
///
/// The axis defaults are zero-width: the stage refuses to move until the
/// operator configures its real travel, which the original hardware
/// required too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageLimits {
    /// X-axis travel
    pub x: AxisLimits,
    /// Y-axis travel
    pub y: AxisLimits,
    /// Z-axis travel
    pub z: AxisLimits,
    /// Allowed jog/grid step sizes
    pub step: AxisLimits,
}

impl Default for StageLimits {
    fn default() -> Self {
        Self {
            x: AxisLimits::new(0.0, 0.0),
            y: AxisLimits::new(0.0, 0.0),
            z: AxisLimits::new(0.0, 0.0),
            step: AxisLimits::new(0.1, 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_limits_are_inclusive() {
        let limits = AxisLimits::new(0.0, 100.0);
        assert!(limits.contains(0.0));
        assert!(limits.contains(100.0));
        assert!(limits.contains(50.0));
        assert!(!limits.contains(-0.1));
        assert!(!limits.contains(100.1));
    }

    #[test]
    fn test_default_travel_is_zero_width() {
        let limits = StageLimits::default();
        assert!(limits.x.contains(0.0));
        assert!(!limits.x.contains(1.0));
        assert!(limits.step.contains(0.1));
        assert!(!limits.step.contains(0.05));
    }
}
