//! Stage command protocol
//!
//! Command formatting and response parsing for the stage's text protocol,
//! a small G-code subset: `G0` (absolute move), `G28` (homing), `G21`/`G20`
//! (unit selection), `M114` (position report). Framing (CR termination and
//! the `ok` acknowledgement) lives in the transport; this module only deals
//! in command text and response shape.

use chipscan_core::{DeviceError, Position, Units};
use regex::Regex;
use std::sync::OnceLock;

/// Feed rate sent with every scan move, in units per minute.
pub const MOVE_FEED_RATE: u32 = 6000;

/// Position report query.
pub const POSITION_QUERY: &str = "M114";

/// Axes addressed by a homing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAxes {
    /// Home X and Y only, leaving Z where it is
    Xy,
    /// Home all three axes
    Xyz,
}

/// Format an absolute move to `position`.
pub fn move_command(position: Position) -> String {
    format!(
        "G0 X {:.1} Y {:.1} Z {:.1} F{}",
        position.x, position.y, position.z, MOVE_FEED_RATE
    )
}

/// The homing command for the given axes. Homing bypasses all limit
/// checks on the device side.
pub fn home_command(axes: HomeAxes) -> &'static str {
    match axes {
        HomeAxes::Xy => "G28 X Y",
        HomeAxes::Xyz => "G28 X Y Z",
    }
}

/// The unit-selection command for `units`.
pub fn units_command(units: Units) -> &'static str {
    match units {
        Units::Mm => "G21",
        Units::Inch => "G20",
    }
}

fn m114_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"X:(-?\d+\.?\d*)\s+Y:(-?\d+\.?\d*)\s+Z:(-?\d+\.?\d*)\s+E:")
            .expect("M114 regex is valid")
    })
}

/// Parse an `M114` position report.
///
/// The firmware reports `X:<x> Y:<y> Z:<z> E:<e> ...`; anything that does
/// not match that fixed shape fails with
/// [`DeviceError::MalformedResponse`].
pub fn parse_m114(response: &str) -> Result<Position, DeviceError> {
    let captures =
        m114_regex()
            .captures(response)
            .ok_or_else(|| DeviceError::MalformedResponse {
                response: response.trim().to_string(),
            })?;

    let axis = |i: usize| -> Result<f64, DeviceError> {
        captures[i]
            .parse::<f64>()
            .map_err(|_| DeviceError::MalformedResponse {
                response: response.trim().to_string(),
            })
    };
    Ok(Position::new(axis(1)?, axis(2)?, axis(3)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_command_framing() {
        let cmd = move_command(Position::new(1.0, 2.55, 10.0));
        assert_eq!(cmd, "G0 X 1.0 Y 2.5 Z 10.0 F6000");
    }

    #[test]
    fn test_home_and_unit_commands() {
        assert_eq!(home_command(HomeAxes::Xy), "G28 X Y");
        assert_eq!(home_command(HomeAxes::Xyz), "G28 X Y Z");
        assert_eq!(units_command(Units::Mm), "G21");
        assert_eq!(units_command(Units::Inch), "G20");
    }

    #[test]
    fn test_parse_m114_report() {
        let pos = parse_m114("X:12.50 Y:0.00 Z:5.20 E:0.00 Count X:1000 Y:0 Z:416\nok").unwrap();
        assert_eq!(pos, Position::new(12.5, 0.0, 5.2));
    }

    #[test]
    fn test_parse_m114_negative_coordinates() {
        let pos = parse_m114("X:-3.00 Y:7.10 Z:-0.10 E:0.00\nok").unwrap();
        assert_eq!(pos, Position::new(-3.0, 7.1, -0.1));
    }

    #[test]
    fn test_parse_m114_rejects_unexpected_shapes() {
        let err = parse_m114("echo:busy processing\nok").unwrap_err();
        assert!(matches!(err, DeviceError::MalformedResponse { .. }));

        let err = parse_m114("X:1.0 Y:2.0\nok").unwrap_err();
        assert!(matches!(err, DeviceError::MalformedResponse { .. }));
    }
}
