//! Sensor Simulation Layer
//!
//! This crate provides a simulated temperature sensor that speaks the same
//! two-byte wire format as the real board. It enables:
//!
//! - Running the desktop without hardware attached
//! - Testing the polling path end to end
//! - Demonstrating every color band of the gauge
//!
//! # Example
//!
//! ```rust
//! use therm_protocol::SensorLink;
//! use therm_sim::{SensorProfile, SimulatedSensor};
//!
//! let mut sensor = SimulatedSensor::new(SensorProfile::Constant { celsius: 21.5 });
//! sensor.tick();
//!
//! assert_eq!(sensor.bytes_available().unwrap(), 2);
//! assert_eq!(sensor.read_sample().unwrap(), [0x00, 0xAC]);
//! ```

mod profile;
mod sensor;

pub use profile::SensorProfile;
pub use sensor::SimulatedSensor;
