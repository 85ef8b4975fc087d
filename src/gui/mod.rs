//! Launcher and overlay windows implemented with egui/eframe

mod app;
mod constants;
mod overlay_view;
mod settings_editor;

use anyhow::{Result, anyhow};
use eframe::{NativeOptions, egui};
use tracing::info;

pub use app::LauncherOptions;
use app::LauncherApp;
use constants::*;

/// Open the launcher and block until it closes
pub fn run_launcher(options: LauncherOptions) -> Result<()> {
    let native = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([LAUNCHER_WIDTH, LAUNCHER_HEIGHT])
            .with_resizable(false)
            .with_decorations(false)
            .with_title(LAUNCHER_TITLE),
        ..Default::default()
    };

    info!(width = LAUNCHER_WIDTH, height = LAUNCHER_HEIGHT, "Opening launcher");
    eframe::run_native(
        LAUNCHER_TITLE,
        native,
        Box::new(move |cc| Ok(Box::new(LauncherApp::new(cc, options)))),
    )
    .map_err(|err| anyhow!("Failed to create launcher window: {err}"))
}
