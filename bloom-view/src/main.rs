//! Application entry point for the flower viewer.
//!
//! This binary sets up logging and eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.
//!
//! Usage: `bloom-view [settings.json]`. Missing keys in the settings file
//! fall back to their defaults.

mod viewer;

use bloom_core::Settings;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Reads settings from `path`, falling back to defaults if the file is
/// missing or invalid.
fn load_settings(path: &Path) -> Settings {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read settings, using defaults");
            return Settings::default();
        }
    };
    match Settings::from_json_str(&text) {
        Ok(settings) => {
            info!(path = %path.display(), "settings loaded");
            settings
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid settings, using defaults");
            Settings::default()
        }
    }
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop, or
///   the flower cannot be planted from the given settings.
fn main() -> eframe::Result<()> {
    init_tracing();

    let settings = std::env::args()
        .nth(1)
        .map(|p| load_settings(Path::new(&p)))
        .unwrap_or_default();

    eframe::run_native(
        "Bloom",
        eframe::NativeOptions::default(),
        Box::new(move |_cc| Ok(Box::new(Viewer::new(settings)?))),
    )
}
