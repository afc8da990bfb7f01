//! Configuration and settings management for ChipScan
//!
//! Provides configuration file handling with JSON persistence in the
//! platform config directory. Configuration is organized into logical
//! sections:
//! - Connection settings (port, baud rate, timeout)
//! - Stage travel limits
//! - Scan defaults (step, pattern, per-point settle time)

use chipscan_core::ConfigError;
use chipscan_device::StageLimits;
use chipscan_pattern::ScanPattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Serial port name, or "Auto" to detect the stage's USB bridge
    pub port: String,
    /// Baud rate for the serial connection
    pub baud_rate: u32,
    /// Response timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            port: "Auto".to_string(),
            baud_rate: chipscan_device::DEFAULT_BAUD_RATE,
            timeout_ms: 120_000,
        }
    }
}

/// Default scan parameters, overridable from the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Grid step size
    pub step: f64,
    /// Default traversal pattern
    pub pattern: ScanPattern,
    /// Dwell time at each grid point in milliseconds
    pub settle_ms: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            step: 1.0,
            pattern: ScanPattern::Horizontal,
            settle_ms: 0,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionSettings,
    /// Stage travel limits
    pub limits: StageLimits,
    /// Scan defaults
    pub scan: ScanSettings,
}

impl Config {
    /// The default configuration file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("chipscan").join("config.json"))
    }

    /// Load configuration from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connection.baud_rate == 0 {
            return Err(ConfigError::Invalid {
                reason: "baud_rate must be non-zero".to_string(),
            });
        }
        for (name, axis) in [
            ("x", self.limits.x),
            ("y", self.limits.y),
            ("z", self.limits.z),
            ("step", self.limits.step),
        ] {
            if axis.min > axis.max {
                return Err(ConfigError::Invalid {
                    reason: format!("{} limits are inverted: {} > {}", name, axis.min, axis.max),
                });
            }
        }
        if !self.scan.step.is_finite() || self.scan.step <= 0.0 {
            return Err(ConfigError::Invalid {
                reason: format!("scan step must be positive, got {}", self.scan.step),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipscan_device::AxisLimits;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.connection.port = "/dev/ttyUSB1".to_string();
        config.limits.x = AxisLimits::new(0.0, 220.0);
        config.scan.pattern = ScanPattern::SpiralIn;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.connection.port, "/dev/ttyUSB1");
        assert_eq!(loaded.limits.x, AxisLimits::new(0.0, 220.0));
        assert_eq!(loaded.scan.pattern, ScanPattern::SpiralIn);
    }

    #[test]
    fn test_invalid_values_are_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.limits.y = AxisLimits::new(10.0, 0.0);
        // Write without validation to simulate a hand-edited file.
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"connection": {"port": "COM3", "baud_rate": 250000, "timeout_ms": 5000}}"#)
            .unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.connection.port, "COM3");
        assert_eq!(loaded.scan.step, 1.0);
    }
}
