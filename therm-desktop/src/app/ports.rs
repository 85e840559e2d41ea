//! Port enumeration methods

use super::ThermoscopeApp;

impl ThermoscopeApp {
    /// Refresh available ports
    pub(super) fn refresh_ports(&mut self) {
        match self.scanner.enumerate_ports() {
            Ok(ports) => {
                self.available_ports = ports;
            }
            Err(e) => {
                self.report_warning("System", format!("Failed to enumerate ports: {}", e));
            }
        }
    }

    /// Whether the configured port showed up in the last enumeration
    pub(super) fn configured_port_listed(&self) -> bool {
        self.available_ports
            .iter()
            .any(|p| p.port == self.settings.port)
    }
}
