//! Thermoscope Desktop Application
//!
//! Polls a serial temperature sensor and shows the reading on a live
//! thermometer gauge.

mod app;
mod diagnostics_layer;
mod gauge;
mod log_console;
mod serial_io;
mod settings;

use std::sync::mpsc;
use std::sync::Arc;

use app::ThermoscopeApp;
use diagnostics_layer::{DiagnosticEvent, DiagnosticLevelState, DiagnosticsLayer, ProjectCrateFilter};
use eframe::NativeOptions;
use settings::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

fn main() -> eframe::Result<()> {
    // Create channel for diagnostic events (before tracing init so we can capture all logs)
    let (diag_tx, diag_rx) = mpsc::channel::<DiagnosticEvent>();

    let settings = Settings::load();
    let diagnostic_level_state = Arc::new(DiagnosticLevelState::new(settings.log_level.to_level()));

    // stderr follows RUST_LOG; the log console follows the level chosen in settings
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "thermoscope=info,therm_protocol=info,therm_detect=info,therm_sim=info".into()
            }),
        ))
        .with(
            DiagnosticsLayer::new(diag_tx)
                .with_filter(ProjectCrateFilter::new(diagnostic_level_state.clone())),
        )
        .init();

    tracing::info!("Starting Thermoscope");

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 600.0])
            .with_min_inner_size([320.0, 560.0])
            .with_title("Temperature Monitor"),
        ..Default::default()
    };

    eframe::run_native(
        "Thermoscope",
        options,
        Box::new(move |cc| {
            Ok(Box::new(ThermoscopeApp::new(
                cc,
                settings,
                diag_rx,
                diagnostic_level_state,
            )))
        }),
    )
}
