//! Simulated sensor link

use std::collections::VecDeque;
use std::io;

use therm_protocol::{SensorLink, Temperature, SAMPLE_LEN};
use tracing::debug;

use crate::profile::SensorProfile;

/// A sensor that produces samples from a [`SensorProfile`]
///
/// Bytes only become readable after [`tick`](Self::tick) or one of the
/// `push_*` methods queues them, mirroring a serial input buffer.
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    profile: SensorProfile,
    /// Samples generated so far
    index: u64,
    /// Bytes waiting to be read
    pending: VecDeque<u8>,
    /// Error to return from the next read
    fault: Option<String>,
}

impl SimulatedSensor {
    /// Create a sensor following the given profile
    pub fn new(profile: SensorProfile) -> Self {
        Self {
            profile,
            index: 0,
            pending: VecDeque::new(),
            fault: None,
        }
    }

    /// Current profile
    pub fn profile(&self) -> SensorProfile {
        self.profile
    }

    /// Switch to a new profile, restarting it from the first sample
    pub fn set_profile(&mut self, profile: SensorProfile) {
        self.profile = profile;
        self.index = 0;
    }

    /// Queue the next sample from the profile
    pub fn tick(&mut self) {
        let celsius = self.profile.celsius_at(self.index);
        self.index = self.index.wrapping_add(1);
        self.push_celsius(celsius);
    }

    /// Queue a sample for a specific Celsius value
    pub fn push_celsius(&mut self, celsius: f32) {
        self.push_raw(&Temperature::from_celsius(celsius).to_bytes());
    }

    /// Queue raw bytes, which need not be sample aligned
    pub fn push_raw(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes.iter().copied());
    }

    /// Make the next read fail with the given message
    pub fn fail_next_read(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("Simulated sensor will fail next read: {}", message);
        self.fault = Some(message);
    }

    /// Number of bytes queued
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl SensorLink for SimulatedSensor {
    fn bytes_available(&mut self) -> io::Result<u32> {
        Ok(self.pending.len().min(u32::MAX as usize) as u32)
    }

    fn read_sample(&mut self) -> io::Result<[u8; 2]> {
        if let Some(message) = self.fault.take() {
            return Err(io::Error::other(message));
        }
        if self.pending.len() < SAMPLE_LEN {
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "simulated sensor has no complete sample",
            ));
        }
        let mut sample = [0u8; 2];
        for byte in sample.iter_mut() {
            *byte = self.pending.pop_front().unwrap_or_default();
        }
        Ok(sample)
    }

    fn describe(&self) -> String {
        format!("Simulator ({})", self.profile.name())
    }
}
