//! Settings editor shown inside the launcher

use eframe::egui;

use super::constants::{ITEM_SPACING, SECTION_SPACING};
use crate::config::{PanelLayout, Settings};
use crate::constants::layout;

/// What the user asked for in this frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditorActions {
    pub changed: bool,
    pub save_requested: bool,
    pub toggle_overlay: bool,
}

/// Renders the settings editor; `overlay` is `Some(visible)` when the overlay
/// window can be shown at all
pub fn ui(ui: &mut egui::Ui, settings: &mut Settings, overlay: Option<bool>) -> EditorActions {
    let mut actions = EditorActions::default();

    // Launch target
    ui.horizontal(|ui| {
        ui.label("Executable path:");
        let edit = egui::TextEdit::singleline(&mut settings.target_path)
            .hint_text("/path/to/program")
            .desired_width(f32::INFINITY);
        if ui.add(edit).changed() {
            actions.changed = true;
        }
    });

    ui.add_space(ITEM_SPACING);

    // Overlay behavior
    if ui.checkbox(&mut settings.overlay_always_on_top, "Overlay always on top").changed() {
        actions.changed = true;
    }
    if ui.checkbox(&mut settings.overlay_click_through, "Overlay click-through").changed() {
        actions.changed = true;
    }

    ui.add_space(ITEM_SPACING);

    ui.horizontal(|ui| {
        if ui.button("Save config").clicked() {
            actions.save_requested = true;
        }

        match overlay {
            Some(visible) => {
                let label = if visible { "Hide Overlay" } else { "Show Overlay" };
                if ui.button(label).clicked() {
                    actions.toggle_overlay = true;
                }
            }
            None => {
                ui.add_enabled(false, egui::Button::new("Overlay unavailable"));
            }
        }
    });

    ui.add_space(SECTION_SPACING);
    ui.separator();
    ui.label(egui::RichText::new("Panels configuration").strong());
    ui.add_space(ITEM_SPACING / 2.0);

    for (identity, panel) in settings.panels.iter_mut() {
        egui::CollapsingHeader::new(identity.as_str())
            .id_salt(("panel-editor", identity.as_str()))
            .show(ui, |ui| {
                if panel_ui(ui, identity, panel) {
                    actions.changed = true;
                }
            });
    }

    actions
}

/// Controls for one panel's layout; returns true if anything changed
fn panel_ui(ui: &mut egui::Ui, identity: &str, panel: &mut PanelLayout) -> bool {
    let mut changed = false;

    changed |= ui.checkbox(&mut panel.enabled, "Enabled").changed();
    changed |= ui.checkbox(&mut panel.background, "Background").changed();

    ui.horizontal(|ui| {
        ui.label("Scale:");
        changed |= ui
            .add(egui::Slider::new(&mut panel.scale, layout::MIN_SCALE..=layout::MAX_SCALE))
            .changed();
    });

    ui.horizontal(|ui| {
        ui.label("Color:");
        changed |= ui.color_edit_button_rgba_unmultiplied(&mut panel.color.0).changed();
        ui.add_space(ITEM_SPACING);
        ui.label("BG Color:");
        changed |= ui
            .color_edit_button_rgba_unmultiplied(&mut panel.bg_color.0)
            .changed();
    });

    changed |= ui.checkbox(&mut panel.movable, "Movable").changed();

    ui.label(
        egui::RichText::new(format!(
            "{identity} at ({:.0}, {:.0})",
            panel.pos.x, panel.pos.y
        ))
        .small()
        .weak(),
    );

    if changed {
        panel.clamp();
    }
    changed
}
