//! Stage controller
//!
//! Owns the transport and tracks the device state: last known position,
//! jog step size, units, and travel limits. Implements the movement
//! contract the scan loop relies on:
//!
//! - `move_to` clamps each axis independently against the configured
//!   limits; a rejected axis keeps its stored value and logs a warning
//!   while the in-bounds axes still move.
//! - `current_position` queries the device with `M114` and trusts its
//!   report over the locally stored value.
//! - Homing is un-clamped and raises Z by a fixed clearance first so the
//!   probe never drags across the surface.

use chipscan_core::{DeviceError, Position, Units};
use tracing::{debug, info, warn};

use crate::limits::StageLimits;
use crate::protocol::{self, HomeAxes};
use crate::transport::Transport;

/// Z clearance applied before a homing move, in stage units.
const HOMING_Z_CLEARANCE: f64 = 20.0;

/// Default jog step size.
const DEFAULT_STEP: f64 = 0.1;

/// The positioning stage behind its serial transport.
pub struct Stage {
    transport: Box<dyn Transport>,
    position: Position,
    step: f64,
    units: Units,
    limits: StageLimits,
}

impl Stage {
    /// Create a stage controller over an open transport.
    pub fn new(transport: Box<dyn Transport>, limits: StageLimits) -> Self {
        Self {
            transport,
            position: Position::default(),
            step: DEFAULT_STEP,
            units: Units::default(),
            limits,
        }
    }

    /// The last known position. May lag the device until the next query.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The configured jog step size
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The configured travel limits
    pub fn limits(&self) -> &StageLimits {
        &self.limits
    }

    /// Command an absolute move, clamping each axis independently.
    ///
    /// Axes outside their travel limits are left at their stored value and
    /// reported with a warning; the remaining axes move. Blocks until the
    /// device acknowledges, then refreshes the position from an `M114`
    /// report.
    pub fn move_to(&mut self, x: f64, y: f64, z: f64) -> Result<Position, DeviceError> {
        let mut target = self.position;
        if self.limits.x.contains(x) {
            target.x = x;
        } else {
            warn!(
                "X out of bounds ({:.1} to {:.1}), keeping X at {:.1}",
                self.limits.x.min, self.limits.x.max, target.x
            );
        }
        if self.limits.y.contains(y) {
            target.y = y;
        } else {
            warn!(
                "Y out of bounds ({:.1} to {:.1}), keeping Y at {:.1}",
                self.limits.y.min, self.limits.y.max, target.y
            );
        }
        if self.limits.z.contains(z) {
            target.z = z;
        } else {
            warn!(
                "Z out of bounds ({:.1} to {:.1}), keeping Z at {:.1}",
                self.limits.z.min, self.limits.z.max, target.z
            );
        }

        debug!(%target, "moving");
        self.transport.exchange(&protocol::move_command(target))?;
        self.position = target;
        self.current_position()
    }

    /// Move one jog step along each requested axis direction (-1, 0, +1).
    pub fn jog(&mut self, dx: i8, dy: i8, dz: i8) -> Result<Position, DeviceError> {
        self.move_to(
            self.position.x + f64::from(dx) * self.step,
            self.position.y + f64::from(dy) * self.step,
            self.position.z + f64::from(dz) * self.step,
        )
    }

    /// Query the device-reported position with `M114`.
    pub fn current_position(&mut self) -> Result<Position, DeviceError> {
        let response = self.transport.exchange(protocol::POSITION_QUERY)?;
        self.position = protocol::parse_m114(&response)?;
        Ok(self.position)
    }

    /// Home the given axes.
    ///
    /// Raises Z by the homing clearance first (clamped like any move),
    /// then issues `G28`. The homing move itself bypasses the travel
    /// limits entirely, so callers must confirm with the operator before
    /// invoking this.
    pub fn home(&mut self, axes: HomeAxes) -> Result<Position, DeviceError> {
        self.move_to(
            self.position.x,
            self.position.y,
            self.position.z + HOMING_Z_CLEARANCE,
        )?;
        info!(?axes, "homing");
        self.transport.exchange(protocol::home_command(axes))?;
        self.current_position()
    }

    /// Switch the device coordinate units (`G21`/`G20`).
    pub fn set_units(&mut self, units: Units) -> Result<(), DeviceError> {
        self.transport.exchange(protocol::units_command(units))?;
        self.units = units;
        info!(%units, "switched units");
        Ok(())
    }

    /// The units the device was last switched to
    pub fn units(&self) -> Units {
        self.units
    }

    /// Set the jog step size, validated against the configured step range.
    pub fn set_step(&mut self, step: f64) -> Result<(), DeviceError> {
        if !self.limits.step.contains(step) {
            return Err(DeviceError::OutOfRange {
                name: "step".to_string(),
                value: step,
                min: self.limits.step.min,
                max: self.limits.step.max,
            });
        }
        self.step = step;
        Ok(())
    }
}
