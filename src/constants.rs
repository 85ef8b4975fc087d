//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// File system locations
pub mod paths {
    /// Settings file, relative to the working directory
    pub const SETTINGS_FILE: &str = "roro_config.json";

    /// Optional launcher background image, relative to the working directory
    pub const BACKGROUND_IMAGE: &str = "launcher_bg.png";

    /// Directory scanned for evdev input devices
    pub const DEV_INPUT: &str = "/dev/input";
}

/// Permission hints printed when input devices cannot be opened
pub mod permissions {
    /// Group that owns /dev/input/event* on most distributions
    pub const INPUT_GROUP: &str = "input";

    /// Command to add the current user to the input group
    pub const ADD_TO_INPUT_GROUP: &str = "sudo usermod -aG input $USER";
}

/// Panel identities of the fixed catalog
///
/// These strings are also the keys of the `panels` object in the settings
/// file, so existing files keep working only if they never change.
pub mod panels {
    pub const FPS_COUNTER: &str = "FPS COUNTER";
    pub const CPS_COUNTER: &str = "CPS COUNTER";
    pub const KEYSTROKE: &str = "KEYSTROKE";
    pub const REACH_COUNTER: &str = "REACH COUNTER";
    pub const WATERMARK: &str = "WATERMARK";

    /// Every identity that must have a layout after settings are loaded
    pub const CATALOG: &[&str] = &[
        FPS_COUNTER,
        CPS_COUNTER,
        KEYSTROKE,
        REACH_COUNTER,
        WATERMARK,
        "MOOVABLE CHAT",
        "MOOVABLE UI",
        "MOOVABLE SCOREBOARD",
        "FAST INVENTORY",
        "JAVA INVENTORY",
        "ESP",
        "WHEATHER CHANGER",
        "TIME CHANGER",
        "FOV",
        "NAMETAGS",
        "HIDE_PSEUDO",
        "TWERK",
        "JAVA_MOVEMENTS",
    ];

    /// Text shown by the watermark panel
    pub const WATERMARK_TEXT: &str = "roro client";
}

/// Per-panel layout defaults and limits
pub mod layout {
    pub const MIN_SCALE: f32 = 0.5;
    pub const MAX_SCALE: f32 = 2.0;
    pub const DEFAULT_SCALE: f32 = 1.0;

    /// Opaque white text
    pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// Half-transparent black background
    pub const DEFAULT_BG_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.5];

    /// Unscaled panel size in logical pixels
    pub const BASE_PANEL_WIDTH: f32 = 180.0;
    pub const BASE_PANEL_HEIGHT: f32 = 30.0;

    /// Default positions cascade down from this origin, wrapping into columns
    pub const DEFAULT_ORIGIN_X: f32 = 20.0;
    pub const DEFAULT_ORIGIN_Y: f32 = 20.0;
    pub const DEFAULT_ROW_STEP: f32 = 36.0;
    pub const DEFAULT_COLUMN_STEP: f32 = 200.0;
    pub const DEFAULT_ROWS_PER_COLUMN: usize = 16;
}

/// Metric sampler timing
pub mod sampling {
    use std::time::Duration;

    /// Frame rate is finalized once this much time has accumulated (seconds)
    pub const FPS_REPORT_INTERVAL: f32 = 0.5;

    /// Slack for float accumulation when comparing against the report interval
    pub const FPS_INTERVAL_EPSILON: f32 = 1e-5;

    /// Trailing window counted by the click-rate sampler
    pub const CPS_WINDOW: Duration = Duration::from_millis(1000);
}

/// X11 keysyms for the polled controls (from X11/keysymdef.h)
pub mod keysyms {
    pub const XK_SPACE: u32 = 0x0020;
    pub const XK_A: u32 = 0x0061;
    pub const XK_D: u32 = 0x0064;
    pub const XK_S: u32 = 0x0073;
    pub const XK_W: u32 = 0x0077;
}

/// Window style bits managed by the window behavior controller
pub mod style {
    /// Window stays above normal windows
    pub const TOPMOST: u32 = 0x0000_0008;

    /// Window is composited with per-pixel alpha
    pub const LAYERED: u32 = 0x0008_0000;

    /// Window ignores pointer input
    pub const TRANSPARENT: u32 = 0x0000_0020;
}
