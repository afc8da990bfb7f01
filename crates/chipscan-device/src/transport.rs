//! Serial transport
//!
//! Provides low-level serial port operations for direct connection to the
//! positioning stage over USB.
//!
//! Supports:
//! - Port enumeration and USB bridge auto-detection
//! - Blocking command/response exchange (write line, read until `ok`)
//! - Baud rate and timeout configuration

use chipscan_core::DeviceError;
use std::io::{Read, Write};
use std::time::{Duration, Instant};

/// USB vendor ID of the CH340 serial bridge the stage ships with.
pub const STAGE_USB_VID: u16 = 0x1A86;
/// USB product ID of the CH340 serial bridge the stage ships with.
pub const STAGE_USB_PID: u16 = 0x7523;

/// Default baud rate of the stage firmware.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Time to wait for a complete response before failing a command. Homing
/// and long moves block until the device acknowledges, so this is generous.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(120);

/// Information about an available serial port.
#[derive(Debug, Clone)]
pub struct PortInfo {
    /// Port name (e.g., "/dev/ttyUSB0", "COM3")
    pub port_name: String,
    /// Port description (e.g., "USB Serial Port")
    pub description: String,
    /// USB vendor ID if applicable
    pub vid: Option<u16>,
    /// USB product ID if applicable
    pub pid: Option<u16>,
}

impl PortInfo {
    /// Whether this port looks like the stage's USB bridge
    pub fn is_stage_bridge(&self) -> bool {
        self.vid == Some(STAGE_USB_VID) && self.pid == Some(STAGE_USB_PID)
    }
}

/// List available serial ports on the system.
pub fn list_ports() -> Result<Vec<PortInfo>, DeviceError> {
    match serialport::available_ports() {
        Ok(ports) => Ok(ports.iter().map(port_info).collect()),
        Err(e) => {
            tracing::error!("Failed to enumerate serial ports: {}", e);
            Err(DeviceError::NoPortFound(format!(
                "cannot enumerate ports: {}",
                e
            )))
        }
    }
}

/// Find the port whose USB IDs match the stage's serial bridge.
pub fn detect_stage_port() -> Result<PortInfo, DeviceError> {
    list_ports()?
        .into_iter()
        .find(PortInfo::is_stage_bridge)
        .ok_or_else(|| {
            DeviceError::NoPortFound(format!(
                "no port with USB IDs {:04x}:{:04x}; pass the port explicitly",
                STAGE_USB_VID, STAGE_USB_PID
            ))
        })
}

fn port_info(port: &serialport::SerialPortInfo) -> PortInfo {
    match &port.port_type {
        serialport::SerialPortType::UsbPort(usb_info) => PortInfo {
            port_name: port.port_name.clone(),
            description: format!(
                "USB {} {}",
                usb_info.manufacturer.as_deref().unwrap_or("Device"),
                usb_info.product.as_deref().unwrap_or("Serial Port")
            ),
            vid: Some(usb_info.vid),
            pid: Some(usb_info.pid),
        },
        _ => PortInfo {
            port_name: port.port_name.clone(),
            description: "Serial Port".to_string(),
            vid: None,
            pid: None,
        },
    }
}

/// Trait for serial port I/O operations
pub trait ReadWrite: Read + Write + Send {}
impl<T: Read + Write + Send> ReadWrite for T {}

/// A blocking command/response channel to the stage.
///
/// One call sends a single CR-terminated command and collects the device's
/// text response up to and including its `ok` acknowledgement.
pub trait Transport: Send {
    /// Send a command and return the full response text.
    fn exchange(&mut self, command: &str) -> Result<String, DeviceError>;

    /// A human-readable name for the underlying channel.
    fn name(&self) -> String;
}

/// Real serial transport using the serialport crate.
pub struct SerialTransport {
    port: Box<dyn ReadWrite>,
    port_name: String,
    timeout: Duration,
}

impl SerialTransport {
    /// Open a serial connection to the stage.
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self, DeviceError> {
        // Short read timeout; exchange() polls until RESPONSE_TIMEOUT.
        let builder = serialport::new(port_name, baud_rate).timeout(Duration::from_millis(50));
        match builder.open_native() {
            Ok(port) => {
                tracing::info!(port = port_name, baud_rate, "opened stage port");
                Ok(Self {
                    port: Box::new(port),
                    port_name: port_name.to_string(),
                    timeout: RESPONSE_TIMEOUT,
                })
            }
            Err(e) => {
                tracing::warn!("Failed to open serial port {}: {}", port_name, e);
                Err(DeviceError::PortOpen {
                    port: port_name.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Override the response timeout (mainly for tests and slow firmware).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Transport for SerialTransport {
    fn exchange(&mut self, command: &str) -> Result<String, DeviceError> {
        tracing::trace!(command, "sending");
        self.port.write_all(command.as_bytes())?;
        self.port.write_all(b"\r")?;
        self.port.flush()?;

        let deadline = Instant::now() + self.timeout;
        let mut response = Vec::new();
        let mut buf = [0u8; 256];
        loop {
            match self.port.read(&mut buf) {
                Ok(0) => {}
                Ok(n) => {
                    response.extend_from_slice(&buf[..n]);
                    if response.windows(2).any(|w| w == b"ok".as_slice()) {
                        let text = String::from_utf8_lossy(&response).into_owned();
                        tracing::trace!(response = %text.trim(), "received");
                        return Ok(text);
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {}
                Err(e) => return Err(e.into()),
            }
            if Instant::now() >= deadline {
                return Err(DeviceError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                });
            }
        }
    }

    fn name(&self) -> String {
        self.port_name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_bridge_detection() {
        let bridge = PortInfo {
            port_name: "/dev/ttyUSB0".to_string(),
            description: "USB QinHeng CH340".to_string(),
            vid: Some(STAGE_USB_VID),
            pid: Some(STAGE_USB_PID),
        };
        assert!(bridge.is_stage_bridge());

        let other = PortInfo {
            port_name: "/dev/ttyACM0".to_string(),
            description: "USB Arduino".to_string(),
            vid: Some(0x2341),
            pid: Some(0x0043),
        };
        assert!(!other.is_stage_bridge());

        let unknown = PortInfo {
            port_name: "COM1".to_string(),
            description: "Serial Port".to_string(),
            vid: None,
            pid: None,
        };
        assert!(!unknown.is_stage_bridge());
    }
}
