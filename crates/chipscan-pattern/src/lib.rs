//! # ChipScan Pattern
//!
//! The scan-pattern core: a rectangular [`Region`] (two corners and a grid
//! step), its derived [`Mesh`] of grid coordinates, and five traversal
//! strategies that enumerate every mesh cell in a selectable order.
//!
//! The split is deliberate: the mesh decides *which* coordinates exist,
//! the traversals decide *in what order* to visit them. All strategies are
//! pure, lazy, restartable functions over the same mesh, so they share one
//! coordinate set by construction. Nothing in this crate touches hardware,
//! plans motion, or checks device limits.
//!
//! ```
//! use chipscan_pattern::{Region, ScanPattern};
//!
//! let region = Region::new((0.0, 0.0), (2.0, 1.0), 1.0)?;
//! let mut pass = ScanPattern::Horizontal.points(&region);
//! assert_eq!(pass.next().map(|p| (p.x, p.y)), Some((0.0, 0.0)));
//! # Ok::<(), chipscan_core::PatternError>(())
//! ```

pub mod mesh;
pub mod random;
pub mod region;
pub mod serpentine;
pub mod spiral;
pub mod traversal;

pub use mesh::Mesh;
pub use region::Region;
pub use traversal::ScanPattern;
