//! GUI-specific constants for layout, status colors and intervals

use egui;

/// Launcher window dimensions
pub const LAUNCHER_WIDTH: f32 = 600.0;
pub const LAUNCHER_HEIGHT: f32 = 360.0;
pub const LAUNCHER_TITLE: &str = "Roro Client Launcher";
pub const APP_TITLE: &str = "Roro Client";

/// Overlay window dimensions
pub const OVERLAY_WIDTH: f32 = 1280.0;
pub const OVERLAY_HEIGHT: f32 = 720.0;
pub const OVERLAY_TITLE: &str = "Roro Overlay";

/// Layout spacing
pub const PADDING: f32 = 10.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;
pub const TITLE_BAR_HEIGHT: f32 = 28.0;
pub const LAUNCH_BUTTON_SIZE: [f32; 2] = [120.0, 40.0];

/// Launcher background
pub const LAUNCHER_CLEAR: egui::Color32 = egui::Color32::from_rgb(18, 18, 20);
pub const BACKGROUND_TINT_ALPHA: u8 = 220;

/// HUD panel styling
pub const PANEL_FONT_SIZE: f32 = 14.0;
pub const PANEL_ROUNDING: u8 = 6;
pub const PANEL_MARGIN_X: i8 = 6;
pub const PANEL_MARGIN_Y: i8 = 4;
pub const PANEL_MIN_SIZE: [f32; 2] = [50.0, 20.0];

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
pub const STATUS_WARN: egui::Color32 = egui::Color32::from_rgb(200, 200, 0);

/// Repaint interval while only the launcher is visible
pub const IDLE_REPAINT_MS: u64 = 100;
