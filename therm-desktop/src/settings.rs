//! Application settings

use std::path::PathBuf;

use egui::Ui;
use serde::{Deserialize, Serialize};
use therm_detect::SerialPortInfo;
use therm_sim::SensorProfile;
use tracing::Level;

/// Where readings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    /// Sensor board on a serial port
    #[default]
    Serial,
    /// Built-in simulated sensor
    Simulated,
}

impl ConnectionType {
    /// Returns a human-readable name for the connection type
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionType::Serial => "Serial port",
            ConnectionType::Simulated => "Simulated",
        }
    }
}

/// Minimum level shown in the log console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Off,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Tracing level, or `None` when the console is off
    pub fn to_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Off => "Off",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warning",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Where readings come from
    #[serde(default)]
    pub connection_type: ConnectionType,
    /// Serial port path
    #[serde(default = "default_port")]
    pub port: String,
    /// Baud rate
    #[serde(default = "default_baud")]
    pub baud_rate: u32,
    /// Serial read timeout in milliseconds
    #[serde(default = "default_read_timeout")]
    pub read_timeout_ms: u64,
    /// Poll interval in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Simulated sensor profile
    #[serde(default)]
    pub sim_profile: SensorProfile,
    /// Log console history size
    #[serde(default = "default_log_history")]
    pub log_history_size: usize,
    /// Log console level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_port() -> String {
    if cfg!(windows) {
        "COM4".to_string()
    } else {
        "/dev/ttyUSB0".to_string()
    }
}

fn default_baud() -> u32 {
    115_200
}

fn default_read_timeout() -> u64 {
    1000
}

fn default_poll_interval() -> u64 {
    500
}

fn default_log_history() -> usize {
    500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connection_type: ConnectionType::Serial,
            port: default_port(),
            baud_rate: default_baud(),
            read_timeout_ms: default_read_timeout(),
            poll_interval_ms: default_poll_interval(),
            sim_profile: SensorProfile::default(),
            log_history_size: default_log_history(),
            log_level: LogLevel::Info,
        }
    }
}

/// Baud rates offered in the dropdown
const COMMON_BAUD_RATES: &[u32] = &[9600, 19200, 38400, 57600, 115_200, 230_400];

impl Settings {
    /// Get the XDG config directory for thermoscope
    /// Uses $XDG_CONFIG_HOME/thermoscope on Linux/macOS, falls back to ~/.config/thermoscope
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("thermoscope"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("thermoscope"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path =
            Self::settings_path().ok_or_else(|| "Could not determine settings path".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, json).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }

    /// Check whether the connection would differ from `other`
    pub fn connection_changed(&self, other: &Settings) -> bool {
        self.connection_type != other.connection_type
            || self.port != other.port
            || self.baud_rate != other.baud_rate
            || self.read_timeout_ms != other.read_timeout_ms
            || self.sim_profile != other.sim_profile
    }

    /// Check if settings have changed and auto-save if so
    /// Returns any error message for display
    fn auto_save_if_changed(&self, previous: &Settings) -> Option<String> {
        if self != previous {
            if let Err(e) = self.save() {
                return Some(e);
            }
        }
        None
    }

    /// Draw settings UI (auto-saves on change)
    /// Returns an error message if save failed
    pub fn draw(&mut self, ui: &mut Ui, ports: &[SerialPortInfo]) -> Option<String> {
        let previous = self.clone();

        egui::Grid::new("settings_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Source:");
                egui::ComboBox::from_id_salt("connection_type")
                    .selected_text(self.connection_type.name())
                    .show_ui(ui, |ui| {
                        for kind in [ConnectionType::Serial, ConnectionType::Simulated] {
                            ui.selectable_value(&mut self.connection_type, kind, kind.name());
                        }
                    });
                ui.end_row();

                if self.connection_type == ConnectionType::Serial {
                    ui.label("Port:");
                    egui::ComboBox::from_id_salt("port")
                        .selected_text(self.port.as_str())
                        .show_ui(ui, |ui| {
                            for info in ports {
                                ui.selectable_value(&mut self.port, info.port.clone(), info.label());
                            }
                        });
                    ui.end_row();

                    // Ports that don't enumerate can still be typed in
                    ui.label("Port path:");
                    ui.text_edit_singleline(&mut self.port);
                    ui.end_row();

                    ui.label("Baud rate:");
                    egui::ComboBox::from_id_salt("baud_rate")
                        .selected_text(self.baud_rate.to_string())
                        .show_ui(ui, |ui| {
                            for &baud in COMMON_BAUD_RATES {
                                ui.selectable_value(&mut self.baud_rate, baud, baud.to_string());
                            }
                        });
                    ui.end_row();

                    ui.label("Read timeout (ms):");
                    ui.add(egui::DragValue::new(&mut self.read_timeout_ms).range(10..=10_000));
                    ui.end_row();
                } else {
                    draw_profile(ui, &mut self.sim_profile);
                }

                ui.label("Poll interval (ms):");
                ui.add(egui::DragValue::new(&mut self.poll_interval_ms).range(50..=10_000));
                ui.end_row();

                ui.label("Log level:");
                egui::ComboBox::from_id_salt("log_level")
                    .selected_text(self.log_level.name())
                    .show_ui(ui, |ui| {
                        for level in LogLevel::ALL {
                            ui.selectable_value(&mut self.log_level, level, level.name());
                        }
                    });
                ui.end_row();

                ui.label("Log history:");
                ui.add(egui::DragValue::new(&mut self.log_history_size).range(50..=10_000));
                ui.end_row();
            });

        ui.add_space(16.0);

        if let Some(path) = Self::settings_path() {
            ui.label(
                egui::RichText::new(format!("Config: {}", path.display()))
                    .small()
                    .color(egui::Color32::GRAY),
            );
        }

        self.auto_save_if_changed(&previous)
    }
}

/// Profile picker and parameters, as grid rows
fn draw_profile(ui: &mut Ui, profile: &mut SensorProfile) {
    ui.label("Profile:");
    egui::ComboBox::from_id_salt("sim_profile")
        .selected_text(profile.name())
        .show_ui(ui, |ui| {
            let choices = [
                SensorProfile::Constant { celsius: 21.5 },
                SensorProfile::default(),
                SensorProfile::Sine {
                    center: 25.0,
                    amplitude: 15.0,
                    period_samples: 60,
                },
            ];
            for choice in choices {
                let selected = std::mem::discriminant(profile) == std::mem::discriminant(&choice);
                if ui.selectable_label(selected, choice.name()).clicked() && !selected {
                    *profile = choice;
                }
            }
        });
    ui.end_row();

    match profile {
        SensorProfile::Constant { celsius } => {
            ui.label("Temperature (°C):");
            ui.add(egui::DragValue::new(celsius).speed(0.125).range(0.0..=100.0));
            ui.end_row();
        }
        SensorProfile::Ramp { from, to, step } => {
            ui.label("From (°C):");
            ui.add(egui::DragValue::new(from).speed(0.5).range(0.0..=100.0));
            ui.end_row();
            ui.label("To (°C):");
            ui.add(egui::DragValue::new(to).speed(0.5).range(0.0..=100.0));
            ui.end_row();
            ui.label("Step (°C):");
            ui.add(egui::DragValue::new(step).speed(0.125).range(0.125..=10.0));
            ui.end_row();
        }
        SensorProfile::Sine {
            center,
            amplitude,
            period_samples,
        } => {
            ui.label("Center (°C):");
            ui.add(egui::DragValue::new(center).speed(0.5).range(0.0..=100.0));
            ui.end_row();
            ui.label("Amplitude (°C):");
            ui.add(egui::DragValue::new(amplitude).speed(0.5).range(0.0..=50.0));
            ui.end_row();
            ui.label("Period (samples):");
            ui.add(egui::DragValue::new(period_samples).range(2..=10_000));
            ui.end_row();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.baud_rate, 115_200);
        assert_eq!(settings.poll_interval_ms, 500);
        assert_eq!(settings.read_timeout_ms, 1000);
        assert_eq!(settings.connection_type, ConnectionType::Serial);
        assert_eq!(settings.log_level.to_level(), Some(Level::INFO));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"port": "COM7"}"#).unwrap();
        assert_eq!(settings.port, "COM7");
        assert_eq!(settings.baud_rate, 115_200);
        assert_eq!(settings.sim_profile, SensorProfile::default());
    }

    #[test]
    fn test_json_round_trip_keeps_profile() {
        let settings = Settings {
            connection_type: ConnectionType::Simulated,
            sim_profile: SensorProfile::Constant { celsius: 42.0 },
            log_level: LogLevel::Debug,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains(r#""connection_type":"simulated""#));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_connection_changed_ignores_ui_only_fields() {
        let base = Settings::default();
        let mut other = base.clone();
        other.poll_interval_ms = 1000;
        other.log_level = LogLevel::Off;
        assert!(!other.connection_changed(&base));

        other.baud_rate = 9600;
        assert!(other.connection_changed(&base));
    }
}
