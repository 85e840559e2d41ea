//! Serial I/O for the sensor connection
//!
//! A poll checks how many bytes the link holds and, once a full sample is
//! waiting, reads exactly one. Extra bytes stay queued for later polls.

use std::io::{self, Read};
use std::time::Duration;

use serialport::SerialPort;
use therm_detect::DetectError;
use therm_protocol::{SensorLink, Temperature, SAMPLE_LEN};
use therm_sim::SimulatedSensor;
use tracing::{error, info};

/// Serial connection to a sensor board
pub struct SensorConnection {
    /// Port name the connection was opened on
    port_name: String,
    /// Serial port
    port: Box<dyn SerialPort>,
}

impl SensorConnection {
    /// Open a sensor connection
    pub fn open(port_name: &str, baud_rate: u32, timeout: Duration) -> Result<Self, DetectError> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|e| DetectError::OpenFailed {
                port: port_name.to_string(),
                reason: e.to_string(),
            })?;

        info!("Opened {} at {} baud", port_name, baud_rate);

        Ok(Self {
            port_name: port_name.to_string(),
            port,
        })
    }
}

impl SensorLink for SensorConnection {
    fn bytes_available(&mut self) -> io::Result<u32> {
        Ok(self.port.bytes_to_read()?)
    }

    fn read_sample(&mut self) -> io::Result<[u8; 2]> {
        let mut sample = [0u8; 2];
        self.port.read_exact(&mut sample)?;
        Ok(sample)
    }

    fn describe(&self) -> String {
        self.port_name.clone()
    }
}

/// Either a real serial connection or a simulated sensor
pub enum SensorLinkBox {
    /// Sensor board on a serial port
    Serial(SensorConnection),
    /// Simulated sensor
    Simulated(SimulatedSensor),
}

impl SensorLinkBox {
    /// Let time pass on the link before a poll
    ///
    /// Real ports fill their own input buffer; the simulator produces one
    /// sample per poll.
    pub fn advance(&mut self) {
        if let Self::Simulated(sensor) = self {
            sensor.tick();
        }
    }

    /// Check if this is a simulated link
    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::Simulated(_))
    }
}

impl SensorLink for SensorLinkBox {
    fn bytes_available(&mut self) -> io::Result<u32> {
        match self {
            Self::Serial(c) => c.bytes_available(),
            Self::Simulated(s) => s.bytes_available(),
        }
    }

    fn read_sample(&mut self) -> io::Result<[u8; 2]> {
        match self {
            Self::Serial(c) => c.read_sample(),
            Self::Simulated(s) => s.read_sample(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Serial(c) => c.describe(),
            Self::Simulated(s) => s.describe(),
        }
    }
}

/// Result of a single poll
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// No link is open
    PortUnavailable,
    /// Link is open but a full sample has not arrived yet
    Waiting,
    /// A sample was read
    Reading(Temperature),
    /// The link reported an error
    ReadError(String),
}

impl PollOutcome {
    /// Status line shown under the gauge
    pub fn status_text(&self) -> &'static str {
        match self {
            PollOutcome::PortUnavailable => "Serial port not available.",
            PollOutcome::Waiting => "Waiting for data...",
            PollOutcome::Reading(_) => "Data received.",
            PollOutcome::ReadError(_) => "Serial read error.",
        }
    }
}

/// Poll a link once
pub fn poll_sensor<L: SensorLink + ?Sized>(link: Option<&mut L>) -> PollOutcome {
    let Some(link) = link else {
        return PollOutcome::PortUnavailable;
    };

    let available = match link.bytes_available() {
        Ok(n) => n as usize,
        Err(e) => return read_error(link, e),
    };

    if available < SAMPLE_LEN {
        return PollOutcome::Waiting;
    }

    match link.read_sample() {
        Ok(bytes) => PollOutcome::Reading(Temperature::from_bytes(bytes)),
        Err(e) => read_error(link, e),
    }
}

fn read_error<L: SensorLink + ?Sized>(link: &L, e: io::Error) -> PollOutcome {
    error!(
        source = "Sensor",
        "Error reading serial data from {}: {}",
        link.describe(),
        e
    );
    PollOutcome::ReadError(e.to_string())
}
