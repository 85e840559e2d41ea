//! Custom tracing layer that feeds the log console

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Crates that belong to this project (for filtering)
const PROJECT_CRATES: &[&str] = &["thermoscope", "therm_protocol", "therm_detect", "therm_sim"];

/// Shared state for dynamic level filtering
///
/// Level encoding: 0=off, 1=error, 2=warn, 3=info, 4=debug, 5=trace
pub struct DiagnosticLevelState {
    level: AtomicU8,
}

impl DiagnosticLevelState {
    /// Create new state with the given initial level
    pub fn new(level: Option<Level>) -> Self {
        Self {
            level: AtomicU8::new(Self::level_to_u8(level)),
        }
    }

    /// Update the filter level
    pub fn set_level(&self, level: Option<Level>) {
        self.level.store(Self::level_to_u8(level), Ordering::Relaxed);
    }

    /// Get the current filter level
    pub fn get_level(&self) -> Option<Level> {
        Self::u8_to_level(self.level.load(Ordering::Relaxed))
    }

    fn level_to_u8(level: Option<Level>) -> u8 {
        match level {
            None => 0,
            Some(Level::ERROR) => 1,
            Some(Level::WARN) => 2,
            Some(Level::INFO) => 3,
            Some(Level::DEBUG) => 4,
            Some(Level::TRACE) => 5,
        }
    }

    fn u8_to_level(value: u8) -> Option<Level> {
        match value {
            0 => None,
            1 => Some(Level::ERROR),
            2 => Some(Level::WARN),
            3 => Some(Level::INFO),
            4 => Some(Level::DEBUG),
            _ => Some(Level::TRACE),
        }
    }
}

fn is_project_target(target: &str) -> bool {
    PROJECT_CRATES
        .iter()
        .any(|crate_name| target.starts_with(crate_name))
}

/// Filter that checks project crate membership and the dynamic level
pub struct ProjectCrateFilter {
    state: Arc<DiagnosticLevelState>,
}

impl ProjectCrateFilter {
    /// Create a new filter with shared state
    pub fn new(state: Arc<DiagnosticLevelState>) -> Self {
        Self { state }
    }
}

impl<S> tracing_subscriber::layer::Filter<S> for ProjectCrateFilter {
    fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        if !is_project_target(meta.target()) {
            return false;
        }

        match self.state.get_level() {
            None => false,
            Some(filter_level) => *meta.level() <= filter_level,
        }
    }

    fn callsite_enabled(&self, meta: &'static Metadata<'static>) -> Interest {
        if is_project_target(meta.target()) {
            // Level is dynamic, so decide per event
            Interest::sometimes()
        } else {
            Interest::never()
        }
    }
}

/// A diagnostic event captured from tracing
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// Source of the event (custom `source` field or derived from target)
    pub source: String,
    /// Severity level
    pub level: Level,
    /// Log message
    pub message: String,
}

/// Tracing layer that captures log events and sends them via channel
pub struct DiagnosticsLayer {
    tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsLayer {
    /// Create a new DiagnosticsLayer that sends events to the given channel
    pub fn new(tx: Sender<DiagnosticEvent>) -> Self {
        Self { tx }
    }
}

impl<S: Subscriber> Layer<S> for DiagnosticsLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let source = visitor
            .source
            .unwrap_or_else(|| simplify_target(event.metadata().target()));

        let diagnostic = DiagnosticEvent {
            source,
            level: *event.metadata().level(),
            message: visitor.message.unwrap_or_default(),
        };

        // Receiver is gone once the window closes
        let _ = self.tx.send(diagnostic);
    }
}

/// Visitor to extract message and optional source from tracing fields
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    source: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            "source" => self.source = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = Some(format!("{:?}", value)),
            "source" => self.source = Some(format!("{:?}", value)),
            _ => {}
        }
    }
}

/// Simplify a module path target to a user-friendly source name
///
/// e.g. "thermoscope::serial_io" -> "Serial_io", "therm_detect::scanner" -> "Scanner"
fn simplify_target(target: &str) -> String {
    target
        .rsplit("::")
        .next()
        .map(|s| {
            let mut chars = s.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => s.to_string(),
            }
        })
        .unwrap_or_else(|| target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_simplify_target() {
        assert_eq!(simplify_target("thermoscope::app"), "App");
        assert_eq!(simplify_target("therm_detect::scanner"), "Scanner");
        assert_eq!(simplify_target("simple"), "Simple");
    }

    #[test]
    fn test_level_state_round_trip() {
        let state = DiagnosticLevelState::new(Some(Level::INFO));
        assert_eq!(state.get_level(), Some(Level::INFO));
        state.set_level(None);
        assert_eq!(state.get_level(), None);
        state.set_level(Some(Level::DEBUG));
        assert_eq!(state.get_level(), Some(Level::DEBUG));
    }

    #[test]
    fn test_layer_captures_source_and_message() {
        let (tx, rx) = mpsc::channel();
        let subscriber = tracing_subscriber::registry().with(DiagnosticsLayer::new(tx));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(source = "Sensor", "read took {} ms", 12);
            tracing::info!("plain message");
        });

        let first = rx.recv().unwrap();
        assert_eq!(first.source, "Sensor");
        assert_eq!(first.level, Level::WARN);
        assert_eq!(first.message, "read took 12 ms");

        let second = rx.recv().unwrap();
        assert_eq!(second.source, "Tests");
        assert_eq!(second.message, "plain message");
    }

    #[test]
    fn test_filter_respects_dynamic_level() {
        let (tx, rx) = mpsc::channel();
        let state = Arc::new(DiagnosticLevelState::new(Some(Level::WARN)));
        let layer = DiagnosticsLayer::new(tx).with_filter(ProjectCrateFilter::new(state.clone()));
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("hidden");
            tracing::error!("shown");
            state.set_level(Some(Level::INFO));
            tracing::info!("now shown");
        });

        let messages: Vec<String> = rx.try_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["shown".to_string(), "now shown".to_string()]);
    }
}
