//! Keeps the overlay window's OS attributes in line with the settings
//!
//! The controller has no memory of its own. Every frame it reads the window's
//! current style, derives the wanted style from [`Settings`] and writes only
//! when the two differ, so repeated calls with the same settings are no-ops.

use anyhow::Result;
use tracing::debug;

use crate::config::Settings;
use crate::constants::style;

/// OS-level window style bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowStyle(u32);

impl WindowStyle {
    pub const TOPMOST: WindowStyle = WindowStyle(style::TOPMOST);
    pub const LAYERED: WindowStyle = WindowStyle(style::LAYERED);
    pub const TRANSPARENT: WindowStyle = WindowStyle(style::TRANSPARENT);

    #[cfg(test)]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: WindowStyle) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn with(self, other: WindowStyle) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn without(self, other: WindowStyle) -> Self {
        Self(self.0 & !other.0)
    }

    /// Bits that differ between the two styles
    pub const fn changed(self, other: WindowStyle) -> Self {
        Self(self.0 ^ other.0)
    }
}

/// A window whose style bits can be read and written
pub trait OverlayWindow {
    fn style(&self) -> WindowStyle;

    fn set_style(&mut self, style: WindowStyle) -> Result<()>;
}

/// Reflects `overlay_always_on_top` and `overlay_click_through` onto a window
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowBehaviorController;

impl WindowBehaviorController {
    /// Style the window should have under `settings`, starting from `current`
    ///
    /// Click-through sets TRANSPARENT and LAYERED; turning it off clears only
    /// TRANSPARENT. Bits this controller does not manage pass through untouched.
    pub fn target_style(current: WindowStyle, settings: &Settings) -> WindowStyle {
        let mut target = current;

        target = if settings.overlay_always_on_top {
            target.with(WindowStyle::TOPMOST)
        } else {
            target.without(WindowStyle::TOPMOST)
        };

        target = if settings.overlay_click_through {
            target
                .with(WindowStyle::TRANSPARENT)
                .with(WindowStyle::LAYERED)
        } else {
            target.without(WindowStyle::TRANSPARENT)
        };

        target
    }

    /// Bring the window's style in line with `settings`
    ///
    /// Returns whether anything was written.
    pub fn apply(&self, window: &mut dyn OverlayWindow, settings: &Settings) -> Result<bool> {
        let current = window.style();
        let target = Self::target_style(current, settings);
        if target == current {
            return Ok(false);
        }

        debug!(
            from = format_args!("{:#x}", current.bits()),
            to = format_args!("{:#x}", target.bits()),
            "Updating overlay window style"
        );
        window.set_style(target)?;
        Ok(true)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeWindow;
    use super::*;

    const UNRELATED: WindowStyle = WindowStyle::from_bits(0x0000_0100);

    fn settings(on_top: bool, click_through: bool) -> Settings {
        Settings {
            overlay_always_on_top: on_top,
            overlay_click_through: click_through,
            ..Settings::default()
        }
    }

    #[test]
    fn test_apply_is_idempotent() {
        let controller = WindowBehaviorController;
        for (on_top, click_through) in [(true, true), (true, false), (false, true), (false, false)] {
            let settings = settings(on_top, click_through);
            let mut window = FakeWindow::with_style(UNRELATED);

            controller.apply(&mut window, &settings).unwrap();
            let once = window.style;
            let writes = window.writes;

            assert!(!controller.apply(&mut window, &settings).unwrap());
            assert_eq!(window.style, once);
            assert_eq!(window.writes, writes);
        }
    }

    #[test]
    fn test_click_through_sets_transparent_and_layered() {
        let mut window = FakeWindow::with_style(UNRELATED);
        WindowBehaviorController
            .apply(&mut window, &settings(false, true))
            .unwrap();
        assert!(window.style.contains(WindowStyle::TRANSPARENT));
        assert!(window.style.contains(WindowStyle::LAYERED));
        assert!(window.style.contains(UNRELATED));
        assert!(!window.style.contains(WindowStyle::TOPMOST));
    }

    #[test]
    fn test_disabling_click_through_restores_input() {
        let controller = WindowBehaviorController;
        let mut window = FakeWindow::with_style(UNRELATED);

        controller.apply(&mut window, &settings(true, true)).unwrap();
        controller.apply(&mut window, &settings(true, false)).unwrap();

        assert!(!window.style.contains(WindowStyle::TRANSPARENT));
        assert!(window.style.contains(UNRELATED));
        assert!(window.style.contains(WindowStyle::TOPMOST));
    }

    #[test]
    fn test_topmost_follows_setting() {
        let controller = WindowBehaviorController;
        let mut window = FakeWindow::default();

        controller.apply(&mut window, &settings(true, false)).unwrap();
        assert!(window.style.contains(WindowStyle::TOPMOST));

        controller.apply(&mut window, &settings(false, false)).unwrap();
        assert!(!window.style.contains(WindowStyle::TOPMOST));
        assert_eq!(window.writes, 2);
    }

    #[test]
    fn test_style_bit_helpers() {
        let style = WindowStyle::TOPMOST.with(WindowStyle::LAYERED);
        assert!(style.contains(WindowStyle::TOPMOST));
        assert_eq!(style.without(WindowStyle::TOPMOST), WindowStyle::LAYERED);
        assert_eq!(style.changed(WindowStyle::LAYERED), WindowStyle::TOPMOST);
    }
}
