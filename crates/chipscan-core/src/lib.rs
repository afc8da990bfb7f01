//! # ChipScan Core
//!
//! Core types, traits, and utilities shared by the ChipScan crates.
//! Provides the fundamental data model (plane points, device positions),
//! unit handling, and the error taxonomy used across the workspace.

pub mod data;
pub mod error;
pub mod types;
pub mod units;

pub use data::{Position, ScanPoint};
pub use error::{ConfigError, DeviceError, Error, PatternError, Result};
pub use types::BoxedIterator;
pub use units::Units;
