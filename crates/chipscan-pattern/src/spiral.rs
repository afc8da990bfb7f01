//! Spiral traversals
//!
//! Two ring-based traversals sharing one 4-phase direction cycle
//! (+x, +y, -x, -y):
//!
//! - [`spiral_in`] starts at the home cell and walks successively shorter
//!   rectangular rings until the grid is exhausted, then emits the center
//!   cell once more as an explicit trailing point.
//! - [`spiral_out`] starts at the mesh cell nearest the region midpoint and
//!   walks successively longer rings until the next position would leave
//!   the bounding rectangle.

use chipscan_core::ScanPoint;

use crate::mesh::Mesh;
use crate::region::Region;

/// Slack applied to the bounding rectangle check so ring corners that land
/// on the boundary within float error are not rejected.
const BOUNDS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    PlusX,
    PlusY,
    MinusX,
    MinusY,
}

impl Phase {
    fn next(self) -> Self {
        match self {
            Self::PlusX => Self::PlusY,
            Self::PlusY => Self::MinusX,
            Self::MinusX => Self::MinusY,
            Self::MinusY => Self::PlusX,
        }
    }

    fn is_x_axis(self) -> bool {
        matches!(self, Self::PlusX | Self::MinusX)
    }
}

/// Inward rectangular spiral over every mesh cell.
///
/// Starts at the home cell. The x and y run lengths begin one short of the
/// grid dimensions and shrink by one ring every two phases, so each
/// perimeter is walked exactly once and the walk finishes on the cell
/// nearest the grid center. That center cell is then emitted once more as
/// a final point: the stream holds `mesh.len() + 1` coordinates, and
/// callers that need strict exactly-once semantics drop the last one.
pub fn spiral_in(mesh: &Mesh) -> SpiralIn {
    SpiralIn {
        mesh: mesh.clone(),
        row: 0,
        col: 0,
        phase: Phase::PlusX,
        phase_index: 0,
        x_run: mesh.cols() - 1,
        y_run: mesh.rows() - 1,
        left_in_phase: mesh.cols() - 1,
        emitted: 0,
        center_emitted: false,
    }
}

/// Iterator state for [`spiral_in`].
#[derive(Debug, Clone)]
pub struct SpiralIn {
    mesh: Mesh,
    row: usize,
    col: usize,
    phase: Phase,
    phase_index: usize,
    x_run: usize,
    y_run: usize,
    left_in_phase: usize,
    emitted: usize,
    center_emitted: bool,
}

impl SpiralIn {
    /// Advance to the next phase in the +x, +y, -x, -y cycle. The run
    /// lengths shrink after every x-axis phase except the opening one,
    /// closing the ring by one cell on each side every two phases.
    fn advance_phase(&mut self) {
        if self.phase.is_x_axis() && self.phase_index > 0 {
            self.x_run = self.x_run.saturating_sub(1);
            self.y_run = self.y_run.saturating_sub(1);
        }
        self.phase = self.phase.next();
        self.phase_index += 1;
        self.left_in_phase = if self.phase.is_x_axis() {
            self.x_run
        } else {
            self.y_run
        };
    }

    fn step(&mut self) {
        match self.phase {
            Phase::PlusX => self.col += 1,
            Phase::MinusX => self.col -= 1,
            Phase::PlusY => self.row += 1,
            Phase::MinusY => self.row -= 1,
        }
        self.left_in_phase -= 1;
    }
}

impl Iterator for SpiralIn {
    type Item = ScanPoint;

    fn next(&mut self) -> Option<ScanPoint> {
        if self.emitted == self.mesh.len() {
            // Trailing emission of the already-visited center cell.
            if self.center_emitted {
                return None;
            }
            self.center_emitted = true;
            return Some(self.mesh.point(self.row, self.col));
        }

        if self.emitted > 0 {
            while self.left_in_phase == 0 {
                if self.x_run == 0 && self.y_run == 0 {
                    self.emitted = self.mesh.len();
                    self.center_emitted = true;
                    return Some(self.mesh.point(self.row, self.col));
                }
                self.advance_phase();
            }
            self.step();
        }
        self.emitted += 1;
        Some(self.mesh.point(self.row, self.col))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.mesh.len() + 1 - self.emitted - usize::from(self.center_emitted);
        (left, Some(left))
    }
}

/// Outward rectangular spiral from the region center.
///
/// The start point is the continuous midpoint of the region snapped to the
/// nearest mesh-aligned coordinate, so the output shares the lattice of
/// the other traversals. Ring runs start one cell long and grow by one
/// every two phases. The walk stops the first time the next position would
/// leave the closed bounding rectangle, so non-square regions are only
/// partially covered by this strategy.
pub fn spiral_out(region: &Region) -> SpiralOut {
    let home = region.home();
    let end = region.end();
    let step_x = if home.x <= end.x {
        region.step()
    } else {
        -region.step()
    };
    let step_y = if home.y <= end.y {
        region.step()
    } else {
        -region.step()
    };

    // Snap the continuous midpoint onto the mesh lattice.
    let mid_x = home.x + ((end.x - home.x) / 2.0 / step_x).round() * step_x;
    let mid_y = home.y + ((end.y - home.y) / 2.0 / step_y).round() * step_y;

    SpiralOut {
        x: mid_x,
        y: mid_y,
        step_x,
        step_y,
        min_x: home.x.min(end.x) - BOUNDS_EPSILON,
        max_x: home.x.max(end.x) + BOUNDS_EPSILON,
        min_y: home.y.min(end.y) - BOUNDS_EPSILON,
        max_y: home.y.max(end.y) + BOUNDS_EPSILON,
        phase: Phase::PlusX,
        run: 1,
        left_in_phase: 1,
        started: false,
        finished: false,
    }
}

/// Iterator state for [`spiral_out`].
#[derive(Debug, Clone)]
pub struct SpiralOut {
    x: f64,
    y: f64,
    step_x: f64,
    step_y: f64,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    phase: Phase,
    run: usize,
    left_in_phase: usize,
    started: bool,
    finished: bool,
}

impl SpiralOut {
    fn in_bounds(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Advance the direction cycle; the run length grows by one after each
    /// pair of phases, tracing one ring per revolution.
    fn advance_phase(&mut self) {
        if matches!(self.phase, Phase::PlusY | Phase::MinusY) {
            self.run += 1;
        }
        self.phase = self.phase.next();
        self.left_in_phase = self.run;
    }
}

impl Iterator for SpiralOut {
    type Item = ScanPoint;

    fn next(&mut self) -> Option<ScanPoint> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(ScanPoint::new(self.x, self.y));
        }

        if self.left_in_phase == 0 {
            self.advance_phase();
        }
        let (next_x, next_y) = match self.phase {
            Phase::PlusX => (self.x + self.step_x, self.y),
            Phase::MinusX => (self.x - self.step_x, self.y),
            Phase::PlusY => (self.x, self.y + self.step_y),
            Phase::MinusY => (self.x, self.y - self.step_y),
        };
        if !self.in_bounds(next_x, next_y) {
            self.finished = true;
            return None;
        }
        self.x = next_x;
        self.y = next_y;
        self.left_in_phase -= 1;
        Some(ScanPoint::new(self.x, self.y))
    }
}
