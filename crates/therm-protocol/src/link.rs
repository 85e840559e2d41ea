//! Byte source abstraction for sensors

use std::io;

/// A connection that delivers raw sensor samples
///
/// Implemented by the desktop's serial port wrapper and by the simulator.
pub trait SensorLink: Send {
    /// Number of bytes waiting to be read
    fn bytes_available(&mut self) -> io::Result<u32>;

    /// Read exactly one two-byte sample
    fn read_sample(&mut self) -> io::Result<[u8; 2]>;

    /// Short human-readable description (port name or "Simulator")
    fn describe(&self) -> String;
}
