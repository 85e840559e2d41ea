//! Main application state and UI
//!
//! This module contains the core `ThermoscopeApp` struct and is organized into submodules:
//! - `connection`: Opening the sensor link and polling it
//! - `ports`: Port enumeration for the port picker
//! - `status`: Status messaging and settings save helpers
//! - `ui_panels`: UI panel drawing methods

mod connection;
mod ports;
mod status;
mod ui_panels;

use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

use eframe::CreationContext;
use therm_detect::{PortScanner, SerialPortInfo};
use therm_protocol::{SensorLink, Temperature};

use crate::diagnostics_layer::{DiagnosticEvent, DiagnosticLevelState};
use crate::log_console::LogConsole;
use crate::serial_io::{PollOutcome, SensorLinkBox};
use crate::settings::{LogLevel, Settings};

/// Main application state
pub struct ThermoscopeApp {
    /// Settings
    pub(super) settings: Settings,
    /// Settings the current link was opened with
    pub(super) link_settings: Settings,
    /// Port scanner
    pub(super) scanner: PortScanner,
    /// Available serial ports
    pub(super) available_ports: Vec<SerialPortInfo>,
    /// Open sensor link, `None` when opening failed or after disconnecting
    pub(super) link: Option<SensorLinkBox>,
    /// Latest reading
    pub(super) temperature: Option<Temperature>,
    /// Result of the latest poll
    pub(super) last_outcome: Option<PollOutcome>,
    /// When the link was last polled
    pub(super) last_poll: Instant,
    /// Status message
    pub(super) status_message: Option<(String, Instant)>,
    /// Show settings panel
    pub(super) show_settings: bool,
    /// Show log console
    pub(super) show_console: bool,
    /// Log console
    pub(super) console: LogConsole,
    /// Diagnostic event receiver (from tracing layer)
    pub(super) diag_rx: Receiver<DiagnosticEvent>,
    /// Shared state for dynamic diagnostics level filtering
    pub(super) diagnostic_level_state: Arc<DiagnosticLevelState>,
    /// Previous log level (for detecting changes)
    pub(super) prev_log_level: LogLevel,
}

impl ThermoscopeApp {
    /// Create a new application
    pub fn new(
        _cc: &CreationContext<'_>,
        settings: Settings,
        diag_rx: Receiver<DiagnosticEvent>,
        diagnostic_level_state: Arc<DiagnosticLevelState>,
    ) -> Self {
        let mut app = Self::with_settings(settings, diag_rx, diagnostic_level_state);

        // Initial port enumeration
        app.refresh_ports();

        app
    }

    /// Create the application state and open the configured link
    pub(super) fn with_settings(
        settings: Settings,
        diag_rx: Receiver<DiagnosticEvent>,
        diagnostic_level_state: Arc<DiagnosticLevelState>,
    ) -> Self {
        let mut app = Self {
            console: LogConsole::new(settings.log_history_size),
            link_settings: settings.clone(),
            prev_log_level: settings.log_level,
            settings,
            scanner: PortScanner::new(),
            available_ports: Vec::new(),
            link: None,
            temperature: None,
            last_outcome: None,
            last_poll: Instant::now(),
            status_message: None,
            show_settings: false,
            show_console: false,
            diag_rx,
            diagnostic_level_state,
        };

        app.connect();

        app
    }

    /// Text for the temperature label
    pub(super) fn temperature_text(&self) -> String {
        match self.temperature {
            Some(temp) => format!("Temperature: {}", temp),
            None => "Temperature: -- °C".to_string(),
        }
    }

    /// Text for the status line under the gauge
    pub(super) fn status_text(&self) -> &'static str {
        self.last_outcome
            .as_ref()
            .map_or("Waiting for data...", PollOutcome::status_text)
    }

    /// Hover text for the status line, naming the link a read failed on
    pub(super) fn status_detail(&self) -> Option<String> {
        let Some(PollOutcome::ReadError(detail)) = &self.last_outcome else {
            return None;
        };
        let source = self
            .link
            .as_ref()
            .map_or_else(|| "No link".to_string(), SensorLink::describe);
        Some(format!("{}: {}", source, detail))
    }

    /// Temperature the gauge shows (0 °C before the first reading)
    pub(super) fn gauge_celsius(&self) -> f32 {
        self.temperature.map_or(0.0, Temperature::celsius)
    }

    /// Move captured diagnostic events into the console
    fn process_diagnostic_events(&mut self) {
        while let Ok(event) = self.diag_rx.try_recv() {
            self.console.push(event);
        }
    }

    /// Apply log-related settings that can change at runtime
    fn apply_log_settings(&mut self) {
        if self.settings.log_level != self.prev_log_level {
            self.diagnostic_level_state
                .set_level(self.settings.log_level.to_level());
            self.prev_log_level = self.settings.log_level;
        }
        self.console.set_max_entries(self.settings.log_history_size);
    }
}

/// Window background
const WINDOW_BG: egui::Color32 = egui::Color32::from_rgb(0x28, 0x28, 0x28);

impl eframe::App for ThermoscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_diagnostic_events();
        self.apply_log_settings();

        let next_poll = self.maybe_poll();
        // Keep polling without user input
        ctx.request_repaint_after(next_poll);

        // Clear old status messages
        if let Some((_, when)) = &self.status_message {
            if when.elapsed().as_secs() > 5 {
                self.status_message = None;
            }
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        if self.show_settings {
            egui::SidePanel::right("settings")
                .default_width(280.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        self.draw_settings_panel(ui);
                    });
                });
        }

        if self.show_console {
            egui::TopBottomPanel::bottom("console")
                .resizable(true)
                .default_height(160.0)
                .show(ctx, |ui| {
                    self.console.ui(ui);
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(WINDOW_BG))
            .show(ctx, |ui| {
                self.draw_readout(ui);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    use therm_sim::SensorProfile;
    use tracing::Level;

    use crate::settings::ConnectionType;

    fn app(settings: Settings) -> ThermoscopeApp {
        let (_tx, rx) = mpsc::channel();
        let state = Arc::new(DiagnosticLevelState::new(Some(Level::INFO)));
        ThermoscopeApp::with_settings(settings, rx, state)
    }

    fn simulated(profile: SensorProfile) -> Settings {
        Settings {
            connection_type: ConnectionType::Simulated,
            sim_profile: profile,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_labels() {
        let app = app(simulated(SensorProfile::default()));
        assert_eq!(app.temperature_text(), "Temperature: -- °C");
        assert_eq!(app.status_text(), "Waiting for data...");
        assert_eq!(app.gauge_celsius(), 0.0);
    }

    #[test]
    fn test_poll_updates_labels() {
        let mut app = app(simulated(SensorProfile::Constant { celsius: 23.5 }));
        app.poll_once();

        assert_eq!(app.temperature_text(), "Temperature: 23.5 °C");
        assert_eq!(app.status_text(), "Data received.");
        assert_eq!(app.gauge_celsius(), 23.5);
    }

    #[test]
    fn test_missing_port_shows_unavailable() {
        let mut app = app(Settings {
            port: "/dev/thermoscope-does-not-exist".to_string(),
            ..Default::default()
        });
        assert!(app.link.is_none());

        app.poll_once();
        assert_eq!(app.status_text(), "Serial port not available.");
        assert_eq!(app.temperature_text(), "Temperature: -- °C");
    }

    #[test]
    fn test_read_error_keeps_last_temperature() {
        let mut app = app(simulated(SensorProfile::Constant { celsius: 12.0 }));
        app.poll_once();

        if let Some(SensorLinkBox::Simulated(sensor)) = app.link.as_mut() {
            sensor.fail_next_read("cable pulled");
        }
        app.poll_once();

        assert_eq!(app.status_text(), "Serial read error.");
        assert_eq!(app.temperature_text(), "Temperature: 12.0 °C");
    }

    #[test]
    fn test_read_error_detail_names_link() {
        let mut app = app(simulated(SensorProfile::Constant { celsius: 12.0 }));
        app.poll_once();
        assert_eq!(app.status_detail(), None);

        if let Some(SensorLinkBox::Simulated(sensor)) = app.link.as_mut() {
            sensor.fail_next_read("cable pulled");
        }
        app.poll_once();

        assert_eq!(
            app.status_detail().as_deref(),
            Some("Simulator (Constant): cable pulled")
        );
    }

    #[test]
    fn test_no_poll_before_interval() {
        let mut app = app(simulated(SensorProfile::Constant { celsius: 18.0 }));
        let interval = Duration::from_millis(app.settings.poll_interval_ms);

        app.last_poll = Instant::now();
        let delay = app.maybe_poll();

        assert!(app.last_outcome.is_none());
        assert!(app.temperature.is_none());
        assert!(delay <= interval);
        assert!(delay > Duration::ZERO);
    }

    #[test]
    fn test_poll_after_interval_reads_one_sample() {
        let mut app = app(simulated(SensorProfile::Constant { celsius: 18.0 }));
        let interval = Duration::from_millis(app.settings.poll_interval_ms);
        if let Some(SensorLinkBox::Simulated(sensor)) = app.link.as_mut() {
            sensor.push_celsius(40.0);
        }

        app.last_poll = Instant::now().checked_sub(interval).unwrap();
        let delay = app.maybe_poll();

        // The queued sample is read; the one the simulator produced stays queued
        assert_eq!(app.gauge_celsius(), 40.0);
        assert_eq!(app.status_text(), "Data received.");
        match app.link.as_ref() {
            Some(SensorLinkBox::Simulated(sensor)) => assert_eq!(sensor.pending(), 2),
            _ => panic!("expected simulated link"),
        }
        assert!(delay <= interval);

        // Polling again right away does nothing
        app.maybe_poll();
        match app.link.as_ref() {
            Some(SensorLinkBox::Simulated(sensor)) => assert_eq!(sensor.pending(), 2),
            _ => panic!("expected simulated link"),
        }
    }

    #[test]
    fn test_reconnect_keeps_running_simulator() {
        let mut app = app(simulated(SensorProfile::Constant { celsius: 5.0 }));
        if let Some(SensorLinkBox::Simulated(sensor)) = app.link.as_mut() {
            sensor.push_celsius(7.0);
        }
        app.settings.sim_profile = SensorProfile::Constant { celsius: 35.0 };
        app.connect();

        match app.link.as_ref() {
            Some(SensorLinkBox::Simulated(sensor)) => {
                assert_eq!(sensor.profile(), SensorProfile::Constant { celsius: 35.0 });
                assert_eq!(sensor.pending(), 2);
            }
            _ => panic!("expected simulated link"),
        }
    }

    #[test]
    fn test_reconnect_applies_new_profile() {
        let mut app = app(simulated(SensorProfile::Constant { celsius: 5.0 }));
        app.settings.sim_profile = SensorProfile::Constant { celsius: 35.0 };
        assert!(app.connection_pending());

        app.connect();
        assert!(!app.connection_pending());
        app.poll_once();
        assert_eq!(app.gauge_celsius(), 35.0);
    }

    #[test]
    fn test_log_level_change_reaches_filter() {
        let mut app = app(simulated(SensorProfile::default()));
        app.settings.log_level = LogLevel::Off;
        app.apply_log_settings();
        assert_eq!(app.diagnostic_level_state.get_level(), None);
    }
}
