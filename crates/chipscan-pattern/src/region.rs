//! Scan region model
//!
//! A [`Region`] is the rectangle to scan: two opposite corners and a grid
//! step. The corners may be given in any orientation; the derived mesh
//! always progresses from `home` toward `end` on each axis. All parameter
//! validation happens here, at configuration time, so every traversal over
//! a constructed region is total.

use chipscan_core::{PatternError, ScanPoint};

use crate::mesh::Mesh;

/// The rectangular scan area: origin corner, opposite corner, grid step.
///
/// Only constructible through [`Region::new`], so a region in hand is
/// always validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    home: ScanPoint,
    end: ScanPoint,
    step: f64,
}

impl Region {
    /// Create a validated region.
    ///
    /// Fails with [`PatternError::InvalidConfiguration`] when `step <= 0`
    /// or any coordinate is not finite. A region with `home == end` is
    /// valid and scans a single point.
    pub fn new(
        home: impl Into<ScanPoint>,
        end: impl Into<ScanPoint>,
        step: f64,
    ) -> Result<Self, PatternError> {
        let home = home.into();
        let end = end.into();
        validate_corner("home", home)?;
        validate_corner("end", end)?;
        validate_step(step)?;
        Ok(Self { home, end, step })
    }

    /// The scan origin corner
    pub fn home(&self) -> ScanPoint {
        self.home
    }

    /// The opposite corner
    pub fn end(&self) -> ScanPoint {
        self.end
    }

    /// The grid spacing along both axes
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Set the home corner
    pub fn set_home(&mut self, x: f64, y: f64) -> Result<(), PatternError> {
        let home = ScanPoint::new(x, y);
        validate_corner("home", home)?;
        self.home = home;
        Ok(())
    }

    /// Set the end corner
    pub fn set_end(&mut self, x: f64, y: f64) -> Result<(), PatternError> {
        let end = ScanPoint::new(x, y);
        validate_corner("end", end)?;
        self.end = end;
        Ok(())
    }

    /// Set the grid step
    pub fn set_step(&mut self, step: f64) -> Result<(), PatternError> {
        validate_step(step)?;
        self.step = step;
        Ok(())
    }

    /// The derived grid for the current parameters.
    ///
    /// Rebuilt on every call; the mesh is never mutated in place.
    pub fn mesh(&self) -> Mesh {
        Mesh::from_region(self)
    }

    /// Total number of grid cells
    pub fn len(&self) -> usize {
        self.mesh().len()
    }

    /// Whether the grid is empty. Inclusive enumeration always yields at
    /// least one point per axis, so this is always false.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_corner(name: &str, point: ScanPoint) -> Result<(), PatternError> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return Err(PatternError::invalid(format!(
            "{} corner must be finite, got ({}, {})",
            name, point.x, point.y
        )));
    }
    Ok(())
}

fn validate_step(step: f64) -> Result<(), PatternError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(PatternError::invalid(format!(
            "step must be a positive finite number, got {}",
            step
        )));
    }
    Ok(())
}
