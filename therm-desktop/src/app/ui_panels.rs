//! UI panel drawing methods

use egui::{Color32, RichText, Ui};
use therm_protocol::SensorLink;

use crate::gauge;
use crate::settings::ConnectionType;

use super::ThermoscopeApp;

const TEMPERATURE_TEXT: Color32 = Color32::from_rgb(0xEE, 0xEE, 0xEE);
const STATUS_TEXT: Color32 = Color32::from_rgb(0xAA, 0xAA, 0xAA);

impl ThermoscopeApp {
    /// Draw the toolbar
    pub(super) fn draw_toolbar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.button("Settings").clicked() {
                self.show_settings = !self.show_settings;
            }

            if self.show_console {
                if ui.button("Hide Log").clicked() {
                    self.show_console = false;
                }
            } else if ui.button("Show Log").clicked() {
                self.show_console = true;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match &self.link {
                    Some(link) if link.is_simulated() => {
                        ui.label(
                            RichText::new("Simulated").color(Color32::from_rgb(100, 180, 255)),
                        );
                    }
                    Some(link) => {
                        ui.label(RichText::new(link.describe()).color(Color32::GREEN));
                    }
                    None => {
                        ui.label(RichText::new("Disconnected").color(Color32::GRAY));
                    }
                }

                if let Some((msg, _)) = &self.status_message {
                    ui.separator();
                    ui.label(RichText::new(msg).small());
                }
            });
        });
    }

    /// Draw the settings side panel
    pub(super) fn draw_settings_panel(&mut self, ui: &mut Ui) {
        ui.heading("Connection");
        ui.separator();

        ui.horizontal(|ui| {
            let label = if self.link.is_some() { "Reconnect" } else { "Connect" };
            if ui.button(label).clicked() {
                self.connect();
            }
            if ui
                .add_enabled(self.link.is_some(), egui::Button::new("Disconnect"))
                .clicked()
            {
                self.disconnect();
            }
            if ui.button("Refresh Ports").clicked() {
                self.refresh_ports();
            }
        });

        if self.connection_pending() {
            ui.label(
                RichText::new("Reconnect to apply changes")
                    .small()
                    .color(Color32::YELLOW),
            );
        }
        if self.settings.connection_type == ConnectionType::Serial && !self.configured_port_listed()
        {
            ui.label(
                RichText::new(format!("{} was not found on this system", self.settings.port))
                    .small()
                    .color(Color32::GRAY),
            );
        }

        ui.add_space(16.0);
        ui.heading("Settings");
        ui.separator();
        if let Some(error) = self.settings.draw(ui, &self.available_ports) {
            self.handle_save_error(error);
        }

        ui.add_space(16.0);
        ui.separator();
        if ui.button("Close").clicked() {
            self.show_settings = false;
        }
    }

    /// Draw the temperature label, gauge, and status line
    pub(super) fn draw_readout(&self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new(self.temperature_text())
                    .size(24.0)
                    .strong()
                    .color(TEMPERATURE_TEXT),
            );

            ui.add_space(8.0);
            gauge::paint(ui, self.gauge_celsius());

            ui.add_space(8.0);
            let status = ui.label(
                RichText::new(self.status_text())
                    .size(14.0)
                    .color(STATUS_TEXT),
            );
            if let Some(detail) = self.status_detail() {
                status.on_hover_text(detail);
            }
        });
    }
}
