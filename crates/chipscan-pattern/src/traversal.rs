//! Traversal strategy selection
//!
//! A closed enumeration of the five visiting orders, selected once at
//! configuration time. Each variant dispatches to a pure function of the
//! region/mesh, so strategies cannot be combined into invalid states the
//! way free-form mode flags can.

use chipscan_core::{BoxedIterator, ScanPoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::region::Region;
use crate::{random, serpentine, spiral};

/// The visiting order for one scan pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanPattern {
    /// Row-major serpentine (x sweeps, alternating direction)
    Horizontal,
    /// Column-major serpentine (y sweeps, alternating direction)
    Vertical,
    /// Rectangular spiral from the home corner to the center
    SpiralIn,
    /// Rectangular spiral from the center outward
    SpiralOut,
    /// Uniform random permutation of the grid
    Random {
        /// Permutation seed; drawn from OS entropy when absent.
        seed: Option<u64>,
    },
}

impl ScanPattern {
    /// The lazy coordinate stream for one scan pass over `region`.
    ///
    /// Restartable: every call starts a fresh pass. All strategies visit
    /// each mesh cell exactly once, with two documented exceptions:
    /// [`ScanPattern::SpiralIn`] appends one trailing duplicate of the
    /// center cell, and [`ScanPattern::SpiralOut`] stops at the rectangle
    /// boundary and may not reach every cell of a non-square region.
    pub fn points(&self, region: &Region) -> BoxedIterator<ScanPoint> {
        match *self {
            Self::Horizontal => Box::new(serpentine::horizontal(&region.mesh())),
            Self::Vertical => Box::new(serpentine::vertical(&region.mesh())),
            Self::SpiralIn => Box::new(spiral::spiral_in(&region.mesh())),
            Self::SpiralOut => Box::new(spiral::spiral_out(region)),
            Self::Random { seed } => Box::new(random::random(&region.mesh(), seed)),
        }
    }
}

impl Default for ScanPattern {
    fn default() -> Self {
        Self::Horizontal
    }
}

impl fmt::Display for ScanPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
            Self::SpiralIn => write!(f, "spiral-in"),
            Self::SpiralOut => write!(f, "spiral-out"),
            Self::Random { .. } => write!(f, "random"),
        }
    }
}

impl FromStr for ScanPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            "spiral-in" => Ok(Self::SpiralIn),
            "spiral-out" => Ok(Self::SpiralOut),
            "random" => Ok(Self::Random { seed: None }),
            _ => Err(format!("Unknown scan pattern: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_streams_from_one_region() {
        let region = Region::new((0.0, 0.0), (2.0, 2.0), 1.0).unwrap();
        let patterns = [
            ScanPattern::Horizontal,
            ScanPattern::Vertical,
            ScanPattern::SpiralIn,
            ScanPattern::SpiralOut,
            ScanPattern::Random { seed: Some(3) },
        ];
        for pattern in patterns {
            let count = pattern.points(&region).count();
            // 3x3 grid; the inward spiral carries its trailing duplicate.
            let expected = match pattern {
                ScanPattern::SpiralIn => 10,
                _ => 9,
            };
            assert_eq!(count, expected, "pattern {}", pattern);
        }
    }

    #[test]
    fn test_invalid_step_is_rejected_before_any_strategy_runs() {
        // One validation gate covers all five variants uniformly.
        assert!(Region::new((0.0, 0.0), (2.0, 2.0), 0.0).is_err());
        assert!(Region::new((0.0, 0.0), (2.0, 2.0), -0.5).is_err());
    }

    #[test]
    fn test_pattern_parsing_round_trip() {
        for name in ["horizontal", "vertical", "spiral-in", "spiral-out", "random"] {
            let pattern: ScanPattern = name.parse().unwrap();
            assert_eq!(pattern.to_string(), name);
        }
        assert!("diagonal".parse::<ScanPattern>().is_err());
    }
}
