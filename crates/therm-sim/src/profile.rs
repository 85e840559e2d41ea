//! Temperature profiles for the simulated sensor

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/// Shape of the temperature curve a simulated sensor produces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorProfile {
    /// Same value every sample
    Constant { celsius: f32 },
    /// Climb from `from` by `step` per sample, wrapping back after `to`
    Ramp { from: f32, to: f32, step: f32 },
    /// Sine wave around `center`
    Sine {
        center: f32,
        amplitude: f32,
        period_samples: u32,
    },
}

impl Default for SensorProfile {
    fn default() -> Self {
        // Sweeps the whole 0-50 °C scale so every band shows up
        SensorProfile::Ramp {
            from: 0.0,
            to: 50.0,
            step: 0.5,
        }
    }
}

impl SensorProfile {
    /// Celsius value for the given sample index
    pub fn celsius_at(&self, index: u64) -> f32 {
        match *self {
            SensorProfile::Constant { celsius } => celsius,
            SensorProfile::Ramp { from, to, step } => {
                if step <= 0.0 || to <= from {
                    return from;
                }
                // Float-to-int casts saturate, so a tiny step caps at u64::MAX
                let steps = (((to - from) / step).floor() as u64).saturating_add(1);
                from + step * (index % steps) as f32
            }
            SensorProfile::Sine {
                center,
                amplitude,
                period_samples,
            } => {
                if period_samples == 0 {
                    return center;
                }
                let phase = (index % period_samples as u64) as f32 / period_samples as f32;
                center + amplitude * (phase * TAU).sin()
            }
        }
    }

    /// Returns a human-readable name for the profile
    pub fn name(&self) -> &'static str {
        match self {
            SensorProfile::Constant { .. } => "Constant",
            SensorProfile::Ramp { .. } => "Ramp",
            SensorProfile::Sine { .. } => "Sine",
        }
    }
}
