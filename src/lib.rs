//! # ChipScan
//!
//! An automated XY surface scanner built on a 3D-printer-class positioning
//! stage. The stage speaks a small G-code subset over USB serial; ChipScan
//! drives it across every point of a rectangular grid so a probe or camera
//! mounted on the carriage can measure each location.
//!
//! ## Architecture
//!
//! ChipScan is organized as a workspace with three crates plus this binary:
//!
//! 1. **chipscan-core** - Shared types, units, and the error taxonomy
//! 2. **chipscan-pattern** - Scan region/mesh model and the five traversal
//!    strategies (serpentines, spirals, random) - pure, hardware-free
//! 3. **chipscan-device** - Serial transport, G-code protocol, and the
//!    stage controller with per-axis travel limits
//! 4. **chipscan** - CLI binary wiring pattern to device

pub mod cli;
pub mod config;

pub use chipscan_core::{
    BoxedIterator, ConfigError, DeviceError, Error, PatternError, Position, Result, ScanPoint,
    Units,
};
pub use chipscan_device::{
    detect_stage_port, list_ports, AxisLimits, HomeAxes, PortInfo, SerialTransport, Stage,
    StageLimits, Transport,
};
pub use chipscan_pattern::{Mesh, Region, ScanPattern};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output and `RUST_LOG`
/// environment variable support.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
