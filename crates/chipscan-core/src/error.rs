//! Error handling for ChipScan
//!
//! Provides error types for all layers of the application:
//! - Pattern errors (scan region / traversal configuration)
//! - Device errors (serial transport, protocol, limits)
//! - Config errors (settings file handling)
//!
//! All error types use `thiserror` for ergonomic error handling. Pattern
//! configuration is validated up front: a scan plan either fails here at
//! configuration time or its coordinate stream is total.

use thiserror::Error;

/// Pattern error type
///
/// Represents errors raised while configuring a scan region or selecting
/// a traversal strategy. Iteration itself never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    /// The region parameters cannot produce a scan plan
    #[error("Invalid scan configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },
}

impl PatternError {
    /// Create an `InvalidConfiguration` error from any message
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Device error type
///
/// Represents errors related to the positioning stage: serial transport,
/// command/response protocol, and parameter limits.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Stage is not connected
    #[error("Stage not connected")]
    NotConnected,

    /// Serial port could not be opened
    #[error("Failed to open port {port}: {reason}")]
    PortOpen {
        /// The port name that failed to open.
        port: String,
        /// The underlying failure description.
        reason: String,
    },

    /// No usable serial port was found during auto-detection
    #[error("No stage found: {0}")]
    NoPortFound(String),

    /// Device response did not match the expected shape
    #[error("Malformed response from device: {response:?}")]
    MalformedResponse {
        /// The raw response text that failed to parse.
        response: String,
    },

    /// Device did not answer within the transport timeout
    #[error("Device timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// A parameter value is outside its allowed range
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
        /// Lower bound of the valid range.
        min: f64,
        /// Upper bound of the valid range.
        max: f64,
    },

    /// I/O error on the serial link
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration file error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read or written
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings contents failed validation
    #[error("Invalid config: {reason}")]
    Invalid {
        /// Why the settings were rejected.
        reason: String,
    },
}

/// Top-level error type aggregating all layers
#[derive(Error, Debug)]
pub enum Error {
    /// Scan pattern configuration error
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Stage device error
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// Settings error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic error with a message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from any message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Result type alias used across the workspace
pub type Result<T> = std::result::Result<T, Error>;
