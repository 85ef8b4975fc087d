//! Panel registry: decides what each HUD panel draws this frame
//!
//! Identities are resolved to a [`PanelKind`] once, when the registry is
//! built or synced, so the per-frame path never compares strings.

mod kind;

pub use kind::PanelKind;

use tracing::{debug, info};

use crate::color::Rgba;
use crate::config::Settings;
use crate::constants::layout;
use crate::metrics::MetricSnapshot;
use crate::types::{Dimensions, Position};

/// Everything the renderer needs to draw one panel for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSpec {
    pub identity: String,
    pub kind: PanelKind,
    pub text: String,
    pub pos: Position,
    /// Minimum panel size, base size times `scale`
    pub size: Dimensions,
    pub scale: f32,
    pub foreground: Rgba,
    /// Background with the effective alpha already applied
    pub background: Rgba,
    pub movable: bool,
    /// False while the overlay is click-through
    pub interactive: bool,
}

/// Catalog of known panels and their content kinds
#[derive(Debug, Default, Clone)]
pub struct PanelRegistry {
    entries: Vec<(String, PanelKind)>,
}

impl PanelRegistry {
    pub fn new(settings: &Settings) -> Self {
        let mut registry = Self::default();
        registry.sync(settings);
        info!(panels = registry.entries.len(), "Panel registry built");
        registry
    }

    /// Register identities that appeared in `settings` since the last sync
    pub fn sync(&mut self, settings: &Settings) {
        for identity in settings.panels.keys() {
            if self.kind_of(identity).is_none() {
                let kind = PanelKind::from_identity(identity);
                debug!(panel = %identity, kind = ?kind, "Registered panel");
                self.entries.push((identity.clone(), kind));
            }
        }
    }

    pub fn kind_of(&self, identity: &str) -> Option<PanelKind> {
        self.entries
            .iter()
            .find(|(name, _)| name == identity)
            .map(|(_, kind)| *kind)
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Render decision for one panel, `None` when it is disabled or has no layout
    pub fn layout_for(
        &self,
        identity: &str,
        settings: &Settings,
        metrics: &MetricSnapshot,
    ) -> Option<RenderSpec> {
        let kind = self
            .kind_of(identity)
            .unwrap_or_else(|| PanelKind::from_identity(identity));
        self.build(identity, kind, settings, metrics)
    }

    fn build(
        &self,
        identity: &str,
        kind: PanelKind,
        settings: &Settings,
        metrics: &MetricSnapshot,
    ) -> Option<RenderSpec> {
        let panel = settings.panel(identity)?;
        if !panel.enabled {
            return None;
        }

        let base = Dimensions::new(layout::BASE_PANEL_WIDTH, layout::BASE_PANEL_HEIGHT);
        Some(RenderSpec {
            identity: identity.to_string(),
            kind,
            text: kind.content(identity, metrics),
            pos: panel.pos,
            size: base.scaled(panel.scale),
            scale: panel.scale,
            foreground: panel.color,
            background: panel.effective_background(),
            movable: panel.movable,
            interactive: !settings.overlay_click_through,
        })
    }

    /// Render decisions for every enabled panel, in registry order
    pub fn frame_specs(&self, settings: &Settings, metrics: &MetricSnapshot) -> Vec<RenderSpec> {
        self.identities()
            .filter_map(|identity| self.layout_for(identity, settings, metrics))
            .collect()
    }

    /// Store the position the renderer actually placed a panel at
    ///
    /// Only movable panels are updated; pinned panels keep their stored
    /// position. Returns true when the layout changed.
    pub fn write_back(&self, identity: &str, realized: Position, settings: &mut Settings) -> bool {
        let Some(panel) = settings.panel_mut(identity) else {
            return false;
        };
        if !panel.movable || !realized.is_finite() || panel.pos == realized {
            return false;
        }
        panel.pos = realized;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::panels;

    fn metrics() -> MetricSnapshot {
        MetricSnapshot { fps: 60.0, cps: 3, ..Default::default() }
    }

    #[test]
    fn test_registry_covers_catalog() {
        let settings = Settings::default();
        let registry = PanelRegistry::new(&settings);
        assert_eq!(registry.identities().count(), panels::CATALOG.len());
        assert_eq!(registry.kind_of(panels::CPS_COUNTER), Some(PanelKind::Cps));
        assert_eq!(registry.kind_of("FOV"), Some(PanelKind::Label));
    }

    #[test]
    fn test_disabled_panel_skipped() {
        let mut settings = Settings::default();
        settings.panel_mut(panels::FPS_COUNTER).unwrap().enabled = false;
        let registry = PanelRegistry::new(&settings);

        assert!(registry.layout_for(panels::FPS_COUNTER, &settings, &metrics()).is_none());
        let specs = registry.frame_specs(&settings, &metrics());
        assert!(specs.iter().all(|s| s.identity != panels::FPS_COUNTER));
        assert_eq!(specs.len(), panels::CATALOG.len() - 1);
    }

    #[test]
    fn test_unknown_identity_renders_its_name() {
        let mut settings = Settings::default();
        settings
            .panels
            .insert("MY CUSTOM PANEL".to_string(), Default::default());
        let registry = PanelRegistry::new(&settings);

        let spec = registry
            .layout_for("MY CUSTOM PANEL", &settings, &metrics())
            .unwrap();
        assert_eq!(spec.kind, PanelKind::Label);
        assert_eq!(spec.text, "MY CUSTOM PANEL");
    }

    #[test]
    fn test_unsynced_identity_still_resolves() {
        let mut settings = Settings::default();
        let registry = PanelRegistry::new(&settings);
        settings
            .panels
            .insert("LATE ARRIVAL".to_string(), Default::default());

        let spec = registry.layout_for("LATE ARRIVAL", &settings, &metrics()).unwrap();
        assert_eq!(spec.text, "LATE ARRIVAL");
        assert!(registry.layout_for("NOT IN SETTINGS", &settings, &metrics()).is_none());
    }

    #[test]
    fn test_sync_adds_new_identities_once() {
        let mut settings = Settings::default();
        let mut registry = PanelRegistry::new(&settings);
        settings.panels.insert("EXTRA".to_string(), Default::default());

        registry.sync(&settings);
        registry.sync(&settings);
        assert_eq!(registry.identities().count(), panels::CATALOG.len() + 1);
    }

    #[test]
    fn test_render_geometry_and_colors() {
        let mut settings = Settings::default();
        {
            let cps = settings.panel_mut(panels::CPS_COUNTER).unwrap();
            cps.scale = 1.5;
            cps.pos = Position::new(300.0, 40.0);
            cps.background = false;
            cps.color = Rgba([1.0, 0.0, 0.0, 1.0]);
        }
        let registry = PanelRegistry::new(&settings);
        let spec = registry.layout_for(panels::CPS_COUNTER, &settings, &metrics()).unwrap();

        assert_eq!(spec.text, "CPS: 3");
        assert_eq!(spec.pos, Position::new(300.0, 40.0));
        assert_eq!(spec.size, Dimensions::new(270.0, 45.0));
        assert_eq!(spec.foreground, Rgba([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(spec.background.alpha(), 0.0);
        assert!(spec.interactive);
    }

    #[test]
    fn test_click_through_disables_interaction() {
        let mut settings = Settings::default();
        settings.overlay_click_through = true;
        let registry = PanelRegistry::new(&settings);
        let specs = registry.frame_specs(&settings, &metrics());
        assert!(specs.iter().all(|s| !s.interactive));
    }

    #[test]
    fn test_write_back_only_for_movable() {
        let mut settings = Settings::default();
        settings.panel_mut(panels::WATERMARK).unwrap().movable = false;
        let registry = PanelRegistry::new(&settings);
        let target = Position::new(640.0, 360.0);

        assert!(registry.write_back(panels::FPS_COUNTER, target, &mut settings));
        assert_eq!(settings.panel(panels::FPS_COUNTER).unwrap().pos, target);

        let pinned = settings.panel(panels::WATERMARK).unwrap().pos;
        assert!(!registry.write_back(panels::WATERMARK, target, &mut settings));
        assert_eq!(settings.panel(panels::WATERMARK).unwrap().pos, pinned);
    }

    #[test]
    fn test_write_back_unknown_identity_is_noop() {
        let mut settings = Settings::default();
        let registry = PanelRegistry::new(&settings);
        let before = settings.clone();
        assert!(!registry.write_back("GHOST", Position::new(1.0, 1.0), &mut settings));
        assert_eq!(settings, before);
    }
}
