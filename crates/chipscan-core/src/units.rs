//! Unit handling
//!
//! The stage protocol is switchable between metric (`G21`) and imperial
//! (`G20`) coordinate units. All internal values are kept in the unit the
//! device was last switched to; conversion helpers are provided for display
//! and configuration input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coordinate units understood by the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Millimeters (metric, `G21`)
    Mm,
    /// Inches (imperial, `G20`)
    Inch,
}

impl Units {
    /// Convert a value from one unit to another.
    ///
    /// Returns the value unchanged when `from == to`.
    pub fn convert(value: f64, from: Units, to: Units) -> f64 {
        match (from, to) {
            (Units::Mm, Units::Inch) => value / 25.4,
            (Units::Inch, Units::Mm) => value * 25.4,
            _ => value,
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::Mm
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm => write!(f, "mm"),
            Self::Inch => write!(f, "in"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mm" | "metric" => Ok(Self::Mm),
            "in" | "inch" | "imperial" => Ok(Self::Inch),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert_eq!(Units::convert(25.4, Units::Mm, Units::Inch), 1.0);
        assert_eq!(Units::convert(2.0, Units::Inch, Units::Mm), 50.8);
        assert_eq!(Units::convert(7.5, Units::Mm, Units::Mm), 7.5);
    }

    #[test]
    fn test_units_parsing() {
        assert_eq!("mm".parse::<Units>().unwrap(), Units::Mm);
        assert_eq!("Imperial".parse::<Units>().unwrap(), Units::Inch);
        assert!("furlong".parse::<Units>().is_err());
    }
}
