//! Overlay viewport: window attribute adapter and panel drawing

use anyhow::Result;
use eframe::egui;
use egui::{ViewportCommand, ViewportId, WindowLevel};
use tracing::debug;

use super::constants::*;
use crate::panels::{PanelKind, RenderSpec};
use crate::types::Position;
use crate::window_behavior::{OverlayWindow, WindowStyle};

/// Builder for the overlay viewport
///
/// Kept constant between frames; topmost and click-through are changed
/// through viewport commands so egui never has to recreate the window.
pub fn viewport_builder() -> egui::ViewportBuilder {
    egui::ViewportBuilder::default()
        .with_title(OVERLAY_TITLE)
        .with_inner_size([OVERLAY_WIDTH, OVERLAY_HEIGHT])
        .with_decorations(false)
        .with_transparent(true)
        .with_resizable(false)
        .with_taskbar(false)
}

/// Style the overlay window has right after creation
pub const INITIAL_STYLE: WindowStyle = WindowStyle::LAYERED;

/// [`OverlayWindow`] backed by egui viewport commands
///
/// egui does not report window level or passthrough back, so the style last
/// sent is mirrored in `style`, which lives as long as the overlay window.
pub struct ViewportWindow<'a> {
    ctx: &'a egui::Context,
    id: ViewportId,
    style: &'a mut WindowStyle,
}

impl<'a> ViewportWindow<'a> {
    pub fn new(ctx: &'a egui::Context, id: ViewportId, style: &'a mut WindowStyle) -> Self {
        Self { ctx, id, style }
    }
}

impl OverlayWindow for ViewportWindow<'_> {
    fn style(&self) -> WindowStyle {
        *self.style
    }

    fn set_style(&mut self, style: WindowStyle) -> Result<()> {
        let changed = self.style.changed(style);

        if changed.contains(WindowStyle::TOPMOST) {
            let level = if style.contains(WindowStyle::TOPMOST) {
                WindowLevel::AlwaysOnTop
            } else {
                WindowLevel::Normal
            };
            debug!(level = ?level, "Setting overlay window level");
            self.ctx
                .send_viewport_cmd_to(self.id, ViewportCommand::WindowLevel(level));
        }

        if changed.contains(WindowStyle::TRANSPARENT) {
            let passthrough = style.contains(WindowStyle::TRANSPARENT);
            debug!(passthrough, "Setting overlay mouse passthrough");
            self.ctx
                .send_viewport_cmd_to(self.id, ViewportCommand::MousePassthrough(passthrough));
        }

        *self.style = style;
        Ok(())
    }
}

/// Draw one HUD panel and return where egui placed it
pub fn draw_panel(ctx: &egui::Context, spec: &RenderSpec) -> Option<Position> {
    let frame = egui::Frame::NONE
        .fill(spec.background.into())
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(egui::Margin::symmetric(PANEL_MARGIN_X, PANEL_MARGIN_Y));

    let min_size = egui::Vec2::from(spec.size).max(egui::Vec2::from(PANEL_MIN_SIZE));

    let mut window = egui::Window::new(spec.identity.as_str())
        .id(egui::Id::new(("hud-panel", spec.identity.as_str())))
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .movable(spec.movable)
        .interactable(spec.interactive)
        .min_size(min_size)
        .frame(frame);

    // Movable panels start at the stored position and then follow the user;
    // pinned ones are put back every frame
    window = if spec.movable {
        window.default_pos(egui::Pos2::from(spec.pos))
    } else {
        window.current_pos(egui::Pos2::from(spec.pos))
    };

    let mut text = egui::RichText::new(&spec.text)
        .color(egui::Color32::from(spec.foreground))
        .size(PANEL_FONT_SIZE * spec.scale);
    // Keeps the key markers from shifting as they toggle
    if spec.kind == PanelKind::Keystrokes {
        text = text.monospace();
    }

    let response = window.show(ctx, |ui| {
        ui.label(text);
    })?;
    Some(Position::from(response.response.rect.min))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_window_sends_only_changed_bits() {
        let ctx = egui::Context::default();
        let mut style = INITIAL_STYLE;

        {
            let mut window = ViewportWindow::new(&ctx, ViewportId::ROOT, &mut style);
            window
                .set_style(INITIAL_STYLE.with(WindowStyle::TOPMOST))
                .unwrap();
            assert!(window.style().contains(WindowStyle::TOPMOST));
        }

        assert!(style.contains(WindowStyle::TOPMOST));
        assert!(style.contains(WindowStyle::LAYERED));
        assert!(!style.contains(WindowStyle::TRANSPARENT));
    }
}
