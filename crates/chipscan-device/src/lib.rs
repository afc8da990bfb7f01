//! # ChipScan Device
//!
//! Serial driver for the positioning stage: port discovery, the blocking
//! command/response transport, the G-code subset the firmware speaks, and
//! the stage controller with per-axis travel limits. The scan core never
//! touches this crate; it hands coordinates to [`Stage::move_to`] and
//! nothing else.

pub mod limits;
pub mod protocol;
pub mod stage;
pub mod transport;

pub use limits::{AxisLimits, StageLimits};
pub use protocol::HomeAxes;
pub use stage::Stage;
pub use transport::{
    detect_stage_port, list_ports, PortInfo, SerialTransport, Transport, DEFAULT_BAUD_RATE,
};
