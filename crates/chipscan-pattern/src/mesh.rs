//! Derived grid model
//!
//! A [`Mesh`] is the concrete, ordered coordinate set a [`Region`]
//! describes: one sequence of x values, one of y values, and their
//! Cartesian product as a row-major grid. Every traversal strategy draws
//! from this single source of truth, so all of them cover an identical
//! coordinate set.

use chipscan_core::ScanPoint;

use crate::region::Region;

/// Tolerance for deciding whether an axis value has passed the far corner.
/// Keeps boundary points that land on the corner within float error from
/// being dropped or doubled.
const AXIS_EPSILON: f64 = 1e-9;

/// Immutable grid view derived from a [`Region`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Mesh {
    /// Build the grid for a region.
    ///
    /// Each axis steps from the home value toward the end value, sign
    /// chosen so the sequence always progresses home-to-end, and is
    /// boundary-inclusive: the last value is the first one at least as far
    /// as the end corner, overshooting by strictly less than one step.
    pub fn from_region(region: &Region) -> Self {
        let home = region.home();
        let end = region.end();
        let step = region.step();
        Self {
            xs: axis_points(home.x, end.x, step),
            ys: axis_points(home.y, end.y, step),
        }
    }

    /// The ordered x coordinates (columns)
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// The ordered y coordinates (rows)
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.ys.len()
    }

    /// Number of grid columns
    pub fn cols(&self) -> usize {
        self.xs.len()
    }

    /// Total number of grid cells
    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Whether the grid has no cells. Never true for a valid region; both
    /// axes always contain at least the home value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cell at `row`, `col` (row-major by y).
    ///
    /// # Panics
    /// Panics when the indices are outside the grid.
    pub fn point(&self, row: usize, col: usize) -> ScanPoint {
        ScanPoint::new(self.xs[col], self.ys[row])
    }

    /// All cells in row-major order
    pub fn points(&self) -> impl Iterator<Item = ScanPoint> + '_ {
        self.ys
            .iter()
            .flat_map(move |&y| self.xs.iter().map(move |&x| ScanPoint::new(x, y)))
    }
}

/// Boundary-inclusive axis enumeration from `from` toward `to`.
fn axis_points(from: f64, to: f64, step: f64) -> Vec<f64> {
    let signed = if from <= to { step } else { -step };
    let span = (to - from) / signed;
    let count = (span + 1.0 - AXIS_EPSILON).ceil().max(1.0) as usize;
    (0..count).map(|i| from + i as f64 * signed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(home: (f64, f64), end: (f64, f64), step: f64) -> Region {
        Region::new(home, end, step).unwrap()
    }

    #[test]
    fn test_axis_enumeration_is_boundary_inclusive() {
        assert_eq!(axis_points(0.0, 2.0, 1.0), vec![0.0, 1.0, 2.0]);
        assert_eq!(axis_points(0.0, 2.5, 1.0), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(axis_points(2.0, 0.0, 1.0), vec![2.0, 1.0, 0.0]);
        assert_eq!(axis_points(1.0, 1.0, 0.5), vec![1.0]);
    }

    #[test]
    fn test_axis_enumeration_tolerates_float_error() {
        // 0.0..=0.3 by 0.1 spans 3 steps only within float tolerance.
        let xs = axis_points(0.0, 0.3, 0.1);
        assert_eq!(xs.len(), 4);
        assert!((xs[3] - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_mesh_len_is_rows_times_cols() {
        let mesh = region((0.0, 0.0), (2.0, 1.0), 1.0).mesh();
        assert_eq!(mesh.cols(), 3);
        assert_eq!(mesh.rows(), 2);
        assert_eq!(mesh.len(), 6);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_grid_is_row_major_by_y() {
        let mesh = region((0.0, 0.0), (2.0, 1.0), 1.0).mesh();
        assert_eq!(mesh.point(0, 1), ScanPoint::new(1.0, 0.0));
        assert_eq!(mesh.point(1, 2), ScanPoint::new(2.0, 1.0));

        let cells: Vec<ScanPoint> = mesh.points().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], ScanPoint::new(0.0, 0.0));
        assert_eq!(cells[3], ScanPoint::new(0.0, 1.0));
    }

    #[test]
    fn test_reversed_corners_progress_home_to_end() {
        let mesh = region((2.0, 1.0), (0.0, 0.0), 1.0).mesh();
        assert_eq!(mesh.xs(), &[2.0, 1.0, 0.0]);
        assert_eq!(mesh.ys(), &[1.0, 0.0]);
    }

    #[test]
    fn test_all_cells_are_distinct() {
        let mesh = region((0.0, 0.0), (3.0, 3.0), 1.5).mesh();
        let cells: Vec<ScanPoint> = mesh.points().collect();
        for (i, a) in cells.iter().enumerate() {
            for b in cells.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
