//! Status messaging and save helpers

use std::time::Instant;

use super::ThermoscopeApp;

impl ThermoscopeApp {
    /// Set a status message (also logs as Info via tracing, which goes to the console)
    pub(super) fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg.clone(), Instant::now()));
        tracing::info!(source = "Status", "{}", msg);
    }

    /// Report a warning via tracing (shows in console and status bar)
    pub(super) fn report_warning(&mut self, source: &str, message: impl Into<String>) {
        let message = message.into();
        self.status_message = Some((format!("{}: {}", source, message), Instant::now()));
        tracing::warn!(source = source, "{}", message);
    }

    /// Report an error via tracing (shows in console and status bar)
    pub(super) fn report_err(&mut self, source: &str, message: impl Into<String>) {
        let message = message.into();
        self.status_message = Some((format!("{}: {}", source, message), Instant::now()));
        tracing::error!(source = source, "{}", message);
    }

    /// Handle a settings save error
    pub(super) fn handle_save_error(&mut self, error: String) {
        self.report_err("Settings", error);
    }
}
