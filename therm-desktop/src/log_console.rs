//! Log console
//!
//! Keeps the most recent diagnostic events captured by the tracing layer and
//! draws them as a scrolling list.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use egui::{Color32, RichText, Ui};
use tracing::Level;

use crate::diagnostics_layer::DiagnosticEvent;

/// A single console line
#[derive(Debug, Clone)]
pub struct ConsoleEntry {
    /// Time since the console was created
    pub elapsed: Duration,
    /// Severity level
    pub level: Level,
    /// Event source
    pub source: String,
    /// Message text
    pub message: String,
}

/// Map a level to its console color
fn level_color(level: Level) -> Color32 {
    match level {
        Level::ERROR => Color32::from_rgb(255, 100, 100),
        Level::WARN => Color32::from_rgb(255, 200, 80),
        Level::INFO => Color32::from_rgb(200, 200, 200),
        _ => Color32::GRAY,
    }
}

/// Log console state
pub struct LogConsole {
    /// Console entries, oldest first
    entries: VecDeque<ConsoleEntry>,
    /// Maximum entries to keep
    max_entries: usize,
    /// Auto-scroll to bottom
    auto_scroll: bool,
    /// Stop appending while paused
    paused: bool,
    started: Instant,
}

impl LogConsole {
    /// Create a new console
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries.min(1024)),
            max_entries: max_entries.max(1),
            auto_scroll: true,
            paused: false,
            started: Instant::now(),
        }
    }

    /// Append an event, dropping the oldest when full
    pub fn push(&mut self, event: DiagnosticEvent) {
        if self.paused {
            return;
        }
        self.entries.push_back(ConsoleEntry {
            elapsed: self.started.elapsed(),
            level: event.level,
            source: event.source,
            message: event.message,
        });
        self.trim();
    }

    /// Change the history size
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries.max(1);
        self.trim();
    }

    fn trim(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &ConsoleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Draw the console
    pub fn ui(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.strong("Log");
            ui.separator();
            ui.checkbox(&mut self.auto_scroll, "Auto-scroll");
            ui.checkbox(&mut self.paused, "Pause");
            if ui.button("Clear").clicked() {
                self.clear();
            }
            ui.label(
                RichText::new(format!("{} entries", self.len()))
                    .small()
                    .color(Color32::GRAY),
            );
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(self.auto_scroll)
            .show(ui, |ui| {
                for entry in self.entries() {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("{:>8.1}s", entry.elapsed.as_secs_f32()))
                                .monospace()
                                .color(Color32::GRAY),
                        );
                        ui.label(
                            RichText::new(format!("{:<5}", entry.level))
                                .monospace()
                                .color(level_color(entry.level)),
                        );
                        ui.label(RichText::new(entry.source.as_str()).strong());
                        ui.label(entry.message.as_str());
                    });
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(message: &str) -> DiagnosticEvent {
        DiagnosticEvent {
            source: "Test".to_string(),
            level: Level::INFO,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_history_is_capped() {
        let mut console = LogConsole::new(3);
        for i in 0..5 {
            console.push(event(&format!("m{}", i)));
        }

        let messages: Vec<_> = console.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_shrinking_history_drops_oldest() {
        let mut console = LogConsole::new(10);
        for i in 0..4 {
            console.push(event(&format!("m{}", i)));
        }
        console.set_max_entries(2);

        assert_eq!(console.len(), 2);
        assert_eq!(console.entries().next().unwrap().message, "m2");
    }

    #[test]
    fn test_pause_drops_events() {
        let mut console = LogConsole::new(10);
        console.paused = true;
        console.push(event("ignored"));
        assert_eq!(console.len(), 0);
    }
}
