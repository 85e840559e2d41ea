//! Sensor sample decoding
//!
//! The sensor sends its reading as a big-endian unsigned 16-bit count.
//! Multiplying the count by [`CELSIUS_PER_LSB`] gives degrees Celsius.
//!
//! # Format
//! - Byte 0: high byte
//! - Byte 1: low byte
//!
//! `0x00 0xC8` is 200 counts, i.e. 25.0 °C.

use std::fmt;

use tracing::trace;

use crate::error::ParseError;

/// Number of bytes in one sample
pub const SAMPLE_LEN: usize = 2;

/// Degrees Celsius per count
pub const CELSIUS_PER_LSB: f32 = 0.125;

/// A single temperature sample as sent by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Temperature {
    /// Raw sensor count
    pub raw: u16,
}

impl Temperature {
    /// Create a temperature from a raw count
    pub const fn from_raw(raw: u16) -> Self {
        Self { raw }
    }

    /// Combine a high and low byte into a sample
    pub const fn from_bytes(bytes: [u8; SAMPLE_LEN]) -> Self {
        Self {
            raw: u16::from_be_bytes(bytes),
        }
    }

    /// Nearest representable sample for a Celsius value
    ///
    /// Values outside the encodable range saturate; NaN maps to zero.
    pub fn from_celsius(celsius: f32) -> Self {
        let counts = (celsius / CELSIUS_PER_LSB)
            .round()
            .clamp(0.0, u16::MAX as f32);
        Self { raw: counts as u16 }
    }

    /// Encode to wire bytes (high byte first)
    pub const fn to_bytes(self) -> [u8; SAMPLE_LEN] {
        self.raw.to_be_bytes()
    }

    /// Temperature in degrees Celsius
    pub fn celsius(self) -> f32 {
        self.raw as f32 * CELSIUS_PER_LSB
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} °C", self.celsius())
    }
}

/// Decode exactly one sample from a byte slice
pub fn decode_sample(bytes: &[u8]) -> Result<Temperature, ParseError> {
    match bytes {
        [hi, lo] => {
            let temp = Temperature::from_bytes([*hi, *lo]);
            trace!("decoded {:02X} {:02X} -> {}", hi, lo, temp);
            Ok(temp)
        }
        _ if bytes.len() < SAMPLE_LEN => Err(ParseError::Incomplete {
            needed: SAMPLE_LEN - bytes.len(),
        }),
        _ => Err(ParseError::TooLong { len: bytes.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_high_byte_first() {
        let temp = decode_sample(&[0x00, 0xC8]).unwrap();
        assert_eq!(temp.raw, 200);
        assert_eq!(temp.celsius(), 25.0);

        let temp = decode_sample(&[0x01, 0x00]).unwrap();
        assert_eq!(temp.raw, 256);
        assert_eq!(temp.celsius(), 32.0);
    }

    #[test]
    fn test_decode_is_unsigned() {
        let temp = decode_sample(&[0xFF, 0xFF]).unwrap();
        assert_eq!(temp.raw, u16::MAX);
        assert_eq!(temp.celsius(), 8191.875);
    }

    #[test]
    fn test_decode_short_buffer() {
        assert_eq!(
            decode_sample(&[0x12]),
            Err(ParseError::Incomplete { needed: 1 })
        );
        assert_eq!(
            decode_sample(&[]),
            Err(ParseError::Incomplete { needed: 2 })
        );
    }

    #[test]
    fn test_decode_long_buffer() {
        assert_eq!(
            decode_sample(&[0, 1, 2]),
            Err(ParseError::TooLong { len: 3 })
        );
    }

    #[test]
    fn test_display_one_decimal() {
        assert_eq!(Temperature::from_raw(171).to_string(), "21.4 °C");
        assert_eq!(Temperature::from_raw(0).to_string(), "0.0 °C");
    }

    #[test]
    fn test_from_celsius_rounds_and_saturates() {
        assert_eq!(Temperature::from_celsius(21.3).raw, 170);
        assert_eq!(Temperature::from_celsius(-4.0).raw, 0);
        assert_eq!(Temperature::from_celsius(1.0e6).raw, u16::MAX);
        assert_eq!(Temperature::from_celsius(f32::NAN).raw, 0);
    }

    #[test]
    fn test_to_bytes() {
        assert_eq!(Temperature::from_raw(0x0123).to_bytes(), [0x01, 0x23]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn celsius_is_raw_times_scale(hi: u8, lo: u8) {
                let temp = decode_sample(&[hi, lo]).unwrap();
                let expected = (((hi as u32) << 8) | lo as u32) as f32 * 0.125;
                prop_assert_eq!(temp.celsius(), expected);
            }

            #[test]
            fn celsius_never_negative(raw: u16) {
                prop_assert!(Temperature::from_raw(raw).celsius() >= 0.0);
            }
        }
    }
}
