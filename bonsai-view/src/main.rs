//! Application entry point for the bonsai viewer.
//!
//! This binary sets up logging and eframe/egui and delegates the
//! animation and drawing to [`Viewer`] from the `viewer` module.

mod viewer;

use anyhow::Result;
use bonsai_core::Config;
use tracing::info;
use viewer::Viewer;

/// Starts the native eframe application.
///
/// The window is sized to fit the default 38x70 grid. Logging is
/// controlled through `RUST_LOG`.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the configuration is rejected or eframe fails to create the
///   native window or event loop.
fn main() -> Result<()> {
    init_tracing();

    let viewer = Viewer::new(Config::default())?;
    info!("Starting bonsai viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([720.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bonsai",
        options,
        Box::new(move |_cc| Ok(Box::new(viewer))),
    )
    .map_err(|err| anyhow::anyhow!("viewer failed: {err}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
