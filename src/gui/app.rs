//! Launcher application: owns the settings, drives both windows each tick

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use eframe::{CreationContext, egui};
use tracing::{debug, error, info, warn};

use super::constants::*;
use super::overlay_view::{self, ViewportWindow};
use super::settings_editor;
use crate::background;
use crate::config::{LoadOutcome, Settings};
use crate::input::InputProvider;
use crate::launch::launch_target;
use crate::overlay::OverlayEngine;
use crate::window_behavior::WindowStyle;

/// Everything `main` decides before the launcher opens
pub struct LauncherOptions {
    pub settings_path: PathBuf,
    pub background_path: PathBuf,
    pub overlay_enabled: bool,
    pub input: Box<dyn InputProvider>,
    pub shutdown: Arc<AtomicBool>,
}

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

impl StatusMessage {
    fn ok(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: STATUS_OK }
    }

    fn warn(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: STATUS_WARN }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: STATUS_ERROR }
    }
}

pub(super) struct LauncherApp {
    settings: Settings,
    settings_path: PathBuf,
    engine: OverlayEngine,
    input: Box<dyn InputProvider>,
    /// False when this platform cannot open a second native window
    overlay_available: bool,
    overlay_visible: bool,
    /// Mirror of the attributes last sent to the overlay window
    overlay_style: WindowStyle,
    background: Option<egui::TextureHandle>,
    status_message: Option<StatusMessage>,
    force_settings_open: bool,
    shutdown: Arc<AtomicBool>,
}

fn overlay_viewport_id() -> egui::ViewportId {
    egui::ViewportId::from_hash_of("roro-overlay")
}

impl LauncherApp {
    pub(super) fn new(cc: &CreationContext<'_>, options: LauncherOptions) -> Self {
        info!("Initializing launcher");

        let (settings, outcome) = Settings::load_or_default(&options.settings_path);
        let status_message = match outcome {
            LoadOutcome::Loaded | LoadOutcome::Missing => None,
            LoadOutcome::Rejected => Some(StatusMessage::warn(
                "Config file could not be read, using defaults",
            )),
        };

        let background = background::load(&options.background_path).map(|image| {
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [image.width as usize, image.height as usize],
                &image.rgba,
            );
            cc.egui_ctx
                .load_texture("launcher-background", color_image, egui::TextureOptions::LINEAR)
        });

        let overlay_available = options.overlay_enabled && !cc.egui_ctx.embed_viewports();
        if !overlay_available {
            warn!(
                requested = options.overlay_enabled,
                "Overlay window unavailable, continuing with launcher only"
            );
        }

        info!(backend = options.input.name(), "Using input backend");

        Self {
            engine: OverlayEngine::new(&settings),
            settings,
            settings_path: options.settings_path,
            input: options.input,
            overlay_available,
            overlay_visible: overlay_available,
            overlay_style: overlay_view::INITIAL_STYLE,
            background,
            status_message,
            force_settings_open: false,
            shutdown: options.shutdown,
        }
    }

    fn launch(&mut self) {
        match launch_target(&self.settings.target_path) {
            Ok(pid) => {
                self.status_message = Some(StatusMessage::ok(format!("Launched (PID {pid})")));
            }
            Err(err) => {
                warn!(error = %err, "Launch failed");
                self.status_message = Some(StatusMessage::error(err.to_string()));
                self.force_settings_open = true;
            }
        }
    }

    fn save_settings(&mut self) {
        match self.settings.save(&self.settings_path) {
            Ok(()) => {
                self.status_message = Some(StatusMessage::ok("Config saved"));
            }
            Err(err) => {
                error!(error = ?err, "Failed to save config");
                self.status_message = Some(StatusMessage::error(format!("Save failed: {err}")));
            }
        }
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        if visible == self.overlay_visible {
            return;
        }
        info!(visible, "Toggling overlay");
        self.overlay_visible = visible;
        if !visible {
            // A new native window is created on the next show
            self.overlay_style = overlay_view::INITIAL_STYLE;
        }
    }

    fn title_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("title_bar")
            .exact_height(TITLE_BAR_HEIGHT)
            .show(ctx, |ui| {
                let drag = ui.interact(
                    ui.max_rect(),
                    egui::Id::new("title_bar_drag"),
                    egui::Sense::click_and_drag(),
                );
                if drag.drag_started_by(egui::PointerButton::Primary) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }

                ui.horizontal_centered(|ui| {
                    ui.label(egui::RichText::new(LAUNCHER_TITLE).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("\u{2715}").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn body(&mut self, ctx: &egui::Context) {
        let frame = egui::Frame::central_panel(&ctx.style()).fill(LAUNCHER_CLEAR);
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let rect = ui.max_rect();

            if let Some(texture) = &self.background {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                let tint = egui::Color32::from_rgba_unmultiplied(255, 255, 255, BACKGROUND_TINT_ALPHA);
                ui.painter().image(texture.id(), rect, uv, tint);
            }

            ui.painter().text(
                rect.left_bottom() + egui::vec2(0.0, -PADDING / 2.0),
                egui::Align2::LEFT_BOTTOM,
                format!("v{}", env!("CARGO_PKG_VERSION")),
                egui::FontId::proportional(12.0),
                egui::Color32::GRAY,
            );

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(PADDING);
                ui.vertical_centered(|ui| {
                    ui.heading(APP_TITLE);
                    ui.add_space(SECTION_SPACING);

                    let launch = egui::Button::new(egui::RichText::new("Launch").size(18.0));
                    if ui.add_sized(LAUNCH_BUTTON_SIZE, launch).clicked() {
                        self.launch();
                    }

                    if let Some(message) = &self.status_message {
                        ui.add_space(ITEM_SPACING);
                        ui.colored_label(message.color, &message.text);
                    }
                    ui.label(
                        egui::RichText::new(format!("Input: {}", self.input.name()))
                            .small()
                            .weak(),
                    );
                });

                ui.add_space(SECTION_SPACING);

                let mut header = egui::CollapsingHeader::new("Settings").id_salt("settings");
                if self.force_settings_open {
                    header = header.open(Some(true));
                    self.force_settings_open = false;
                }

                let overlay = self.overlay_available.then_some(self.overlay_visible);
                let actions = header
                    .show(ui, |ui| settings_editor::ui(ui, &mut self.settings, overlay))
                    .body_returned
                    .unwrap_or_default();

                if actions.changed {
                    debug!("Settings edited");
                }
                if actions.save_requested {
                    self.save_settings();
                }
                if actions.toggle_overlay {
                    self.set_overlay_visible(!self.overlay_visible);
                }

                ui.add_space(SECTION_SPACING);
            });
        });
    }

    fn overlay(&mut self, ctx: &egui::Context) {
        let id = overlay_viewport_id();
        let Self {
            engine,
            settings,
            input,
            overlay_style,
            overlay_visible,
            ..
        } = self;

        let report = ctx.show_viewport_immediate(id, overlay_view::viewport_builder(), |ctx, _class| {
            if ctx.input(|i| i.viewport().close_requested()) {
                *overlay_visible = false;
            }

            let mut window = ViewportWindow::new(ctx, id, &mut *overlay_style);
            engine.frame(
                Instant::now(),
                &mut *settings,
                input.as_ref(),
                &mut window,
                |spec| overlay_view::draw_panel(ctx, spec),
            )
        });

        if report.moved > 0 {
            debug!(moved = report.moved, "Panel positions updated");
        }
        if !self.overlay_visible {
            self.overlay_style = overlay_view::INITIAL_STYLE;
        }
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.shutdown.load(Ordering::Relaxed) {
            info!("Shutdown requested by signal");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        self.title_bar(ctx);
        self.body(ctx);

        if self.overlay_available && self.overlay_visible {
            self.overlay(ctx);
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_millis(IDLE_REPAINT_MS));
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // The overlay viewport relies on this to stay see-through
        [0.0, 0.0, 0.0, 0.0]
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(err) = self.settings.save(&self.settings_path) {
            error!(error = ?err, "Failed to save config during shutdown");
        }
        info!("Launcher exiting");
    }
}
