//! Serial Port Enumeration for Thermoscope
//!
//! This crate lists the serial ports a temperature sensor board may be
//! attached to, so the desktop can offer them in its port picker.
//!
//! # Example
//!
//! ```rust,no_run
//! use therm_detect::PortScanner;
//!
//! let scanner = PortScanner::new();
//! let ports = scanner.enumerate_ports().unwrap();
//!
//! for port in ports {
//!     println!("Found port: {}", port.label());
//! }
//! ```

pub mod error;
pub mod scanner;

pub use error::DetectError;
pub use scanner::{PortScanner, SerialPortInfo};
