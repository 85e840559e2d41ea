//! Opening the sensor link and polling it

use std::time::{Duration, Instant};

use therm_detect::DetectError;
use therm_protocol::{ColorBand, SensorLink};
use therm_sim::SimulatedSensor;
use tracing::{debug, info};

use crate::serial_io::{poll_sensor, PollOutcome, SensorConnection, SensorLinkBox};
use crate::settings::{ConnectionType, Settings};

use super::ThermoscopeApp;

/// Open the link described by the settings
fn open_link(settings: &Settings) -> Result<SensorLinkBox, DetectError> {
    match settings.connection_type {
        ConnectionType::Serial => SensorConnection::open(
            &settings.port,
            settings.baud_rate,
            Duration::from_millis(settings.read_timeout_ms),
        )
        .map(SensorLinkBox::Serial),
        ConnectionType::Simulated => Ok(SensorLinkBox::Simulated(SimulatedSensor::new(
            settings.sim_profile,
        ))),
    }
}

impl ThermoscopeApp {
    /// (Re)open the link with the current settings
    ///
    /// A running simulator keeps its queue and only switches profile. On failure the link stays closed and polls report the port as
    /// unavailable.
    pub(super) fn connect(&mut self) {
        if self.retarget_simulator() {
            self.link_settings = self.settings.clone();
            return;
        }

        self.link = None;
        self.link_settings = self.settings.clone();

        match open_link(&self.settings) {
            Ok(link) => {
                self.set_status(format!("Connected to {}", link.describe()));
                self.link = Some(link);
            }
            Err(e) => {
                self.report_err("Serial", format!("Serial port error: {}", e));
            }
        }
    }

    /// Point a running simulator at the configured profile
    ///
    /// Returns false when the link has to be reopened instead.
    fn retarget_simulator(&mut self) -> bool {
        if self.settings.connection_type != ConnectionType::Simulated {
            return false;
        }
        let Some(SensorLinkBox::Simulated(sensor)) = self.link.as_mut() else {
            return false;
        };

        if sensor.profile() != self.settings.sim_profile {
            sensor.set_profile(self.settings.sim_profile);
            info!(
                source = "Simulator",
                "Profile changed to {}",
                sensor.profile().name()
            );
        }
        true
    }

    /// Close the link
    pub(super) fn disconnect(&mut self) {
        if let Some(link) = self.link.take() {
            self.set_status(format!("Disconnected from {}", link.describe()));
        }
    }

    /// Whether the settings changed since the link was opened
    pub(super) fn connection_pending(&self) -> bool {
        self.settings.connection_changed(&self.link_settings)
    }

    /// Poll if the interval elapsed; returns the time until the next poll
    pub(super) fn maybe_poll(&mut self) -> Duration {
        let interval = Duration::from_millis(self.settings.poll_interval_ms.max(1));

        if self.last_poll.elapsed() >= interval {
            self.last_poll = Instant::now();
            self.poll_once();
        }

        interval.saturating_sub(self.last_poll.elapsed())
    }

    /// Poll the link once and update the displayed values
    pub(super) fn poll_once(&mut self) {
        if let Some(link) = self.link.as_mut() {
            link.advance();
        }

        let outcome = poll_sensor(self.link.as_mut());
        if let PollOutcome::Reading(temp) = &outcome {
            debug!(
                "Temperature: {} ({})",
                temp,
                ColorBand::classify(temp.celsius()).name()
            );
            self.temperature = Some(*temp);
        }
        self.last_outcome = Some(outcome);
    }
}
