//! Temperature Sensor Protocol Library
//!
//! This crate describes the wire format spoken by the serial temperature
//! sensor boards that Thermoscope reads:
//!
//! - **Sample**: two bytes, high byte first, forming an unsigned 16-bit value
//! - **Scale**: each count is 0.125 °C (the LM75B's 11-bit resolution step)
//!
//! It also provides the color bands the gauge uses to tint its fill, and the
//! [`SensorLink`] trait that both real serial ports and simulated sensors
//! implement.
//!
//! # Example
//!
//! ```rust
//! use therm_protocol::{decode_sample, ColorBand};
//!
//! let temp = decode_sample(&[0x00, 0xC8]).unwrap();
//! assert_eq!(temp.celsius(), 25.0);
//! assert_eq!(ColorBand::classify(temp.celsius()), ColorBand::Warm);
//! ```

pub mod band;
pub mod error;
pub mod link;
pub mod sample;

pub use band::ColorBand;
pub use error::ParseError;
pub use link::SensorLink;
pub use sample::{decode_sample, Temperature, CELSIUS_PER_LSB, SAMPLE_LEN};
