//! Serpentine (boustrophedon) traversals
//!
//! Row- and column-major sweeps that alternate direction on each pass so
//! the stage never re-homes between lines. Both are pure functions of the
//! mesh: stateless, restartable, and exactly-once over every cell.

use chipscan_core::{BoxedIterator, ScanPoint};

use crate::mesh::Mesh;

/// Row-major serpentine: rows in mesh y-order, even rows sweeping
/// home-to-end in x, odd rows reversed.
pub fn horizontal(mesh: &Mesh) -> impl Iterator<Item = ScanPoint> {
    let xs = mesh.xs().to_vec();
    let ys = mesh.ys().to_vec();
    ys.into_iter().enumerate().flat_map(move |(row, y)| {
        let sweep: BoxedIterator<f64> = if row % 2 == 0 {
            Box::new(xs.clone().into_iter())
        } else {
            Box::new(xs.clone().into_iter().rev())
        };
        sweep.map(move |x| ScanPoint::new(x, y))
    })
}

/// Column-major serpentine: columns in mesh x-order, even columns sweeping
/// home-to-end in y, odd columns reversed.
pub fn vertical(mesh: &Mesh) -> impl Iterator<Item = ScanPoint> {
    let xs = mesh.xs().to_vec();
    let ys = mesh.ys().to_vec();
    xs.into_iter().enumerate().flat_map(move |(col, x)| {
        let sweep: BoxedIterator<f64> = if col % 2 == 0 {
            Box::new(ys.clone().into_iter())
        } else {
            Box::new(ys.clone().into_iter().rev())
        };
        sweep.map(move |y| ScanPoint::new(x, y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    fn mesh(home: (f64, f64), end: (f64, f64), step: f64) -> Mesh {
        Region::new(home, end, step).unwrap().mesh()
    }

    fn points(pts: &[(f64, f64)]) -> Vec<ScanPoint> {
        pts.iter().map(|&(x, y)| ScanPoint::new(x, y)).collect()
    }

    #[test]
    fn test_horizontal_reference_sequence() {
        let got: Vec<ScanPoint> = horizontal(&mesh((0.0, 0.0), (2.0, 1.0), 1.0)).collect();
        let want = points(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ]);
        assert_eq!(got, want);
    }

    #[test]
    fn test_vertical_reference_sequence() {
        let got: Vec<ScanPoint> = vertical(&mesh((0.0, 0.0), (2.0, 1.0), 1.0)).collect();
        let want = points(&[
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
        ]);
        assert_eq!(got, want);
    }

    #[test]
    fn test_horizontal_with_reversed_corners() {
        // Sweeps must still start at home, whatever the corner orientation.
        let got: Vec<ScanPoint> = horizontal(&mesh((2.0, 1.0), (0.0, 0.0), 1.0)).collect();
        assert_eq!(got[0], ScanPoint::new(2.0, 1.0));
        assert_eq!(got[2], ScanPoint::new(0.0, 1.0));
        assert_eq!(got[3], ScanPoint::new(0.0, 0.0));
        assert_eq!(got.len(), 6);
    }

    #[test]
    fn test_serpentine_is_restartable() {
        let m = mesh((0.0, 0.0), (3.0, 3.0), 1.0);
        let first: Vec<ScanPoint> = horizontal(&m).collect();
        let second: Vec<ScanPoint> = horizontal(&m).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_row_and_single_column() {
        let got: Vec<ScanPoint> = horizontal(&mesh((0.0, 0.0), (2.0, 0.0), 1.0)).collect();
        assert_eq!(
            got,
            points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])
        );

        let got: Vec<ScanPoint> = vertical(&mesh((0.0, 0.0), (0.0, 2.0), 1.0)).collect();
        assert_eq!(
            got,
            points(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)])
        );
    }
}
