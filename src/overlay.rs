//! Per-frame overlay logic, independent of the GUI toolkit
//!
//! One call to [`OverlayEngine::frame`] is one overlay tick: sample metrics,
//! sync window attributes, decide what every panel draws, hand the decisions
//! to the renderer and store the positions it reports back.

use std::time::Instant;
use tracing::warn;

use crate::config::Settings;
use crate::input::InputProvider;
use crate::metrics::{
    ClickEdgeDetector, ClickHistory, FrameRateSampler, KeyState, MetricSnapshot, ReachValue,
};
use crate::panels::{PanelRegistry, RenderSpec};
use crate::types::Position;
use crate::window_behavior::{OverlayWindow, WindowBehaviorController};

/// What happened during one overlay tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub metrics: MetricSnapshot,
    /// Panels handed to the renderer
    pub drawn: usize,
    /// Panels whose stored position changed
    pub moved: usize,
}

/// Sampler state and panel registry owned by the render loop
#[derive(Debug)]
pub struct OverlayEngine {
    registry: PanelRegistry,
    fps: FrameRateSampler,
    clicks: ClickHistory,
    click_edge: ClickEdgeDetector,
    keys: KeyState,
    reach: ReachValue,
    behavior: WindowBehaviorController,
    last_tick: Option<Instant>,
}

impl OverlayEngine {
    pub fn new(settings: &Settings) -> Self {
        Self {
            registry: PanelRegistry::new(settings),
            fps: FrameRateSampler::new(),
            clicks: ClickHistory::new(),
            click_edge: ClickEdgeDetector::default(),
            keys: KeyState::default(),
            reach: ReachValue::default(),
            behavior: WindowBehaviorController,
            last_tick: None,
        }
    }

    #[cfg(test)]
    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    /// Feed a reach distance from outside; see [`ReachValue`]
    // No in-tree reach source exists, so only tests call this today
    #[allow(dead_code)]
    pub fn set_reach(&mut self, metres: f32) {
        self.reach.set(metres);
    }

    /// Advance every sampler to `now` and poll input once
    ///
    /// The frame-rate sampler gets the time since the previous overlay tick,
    /// including any time the overlay spent hidden.
    pub fn sample(&mut self, now: Instant, input: &dyn InputProvider) -> MetricSnapshot {
        if let Some(last) = self.last_tick {
            self.fps.tick(now.saturating_duration_since(last).as_secs_f32());
        }
        self.last_tick = Some(now);

        self.keys = KeyState::poll(input);
        if self.click_edge.update(input.primary_pointer_down()) {
            self.clicks.record_click(now);
        }

        MetricSnapshot {
            fps: self.fps.current_rate(),
            cps: self.clicks.count(now),
            keys: self.keys,
            reach: self.reach.get(),
        }
    }

    /// Run one overlay tick
    ///
    /// `draw` renders a panel and returns where it actually ended up, or
    /// `None` if the renderer could not place it.
    pub fn frame<F>(
        &mut self,
        now: Instant,
        settings: &mut Settings,
        input: &dyn InputProvider,
        window: &mut dyn OverlayWindow,
        mut draw: F,
    ) -> FrameReport
    where
        F: FnMut(&RenderSpec) -> Option<Position>,
    {
        let metrics = self.sample(now, input);

        if let Err(e) = self.behavior.apply(window, settings) {
            warn!(error = ?e, "Failed to update overlay window attributes");
        }

        // Panels are never removed at runtime, so a size mismatch means new ones
        if self.registry.identities().count() != settings.panels.len() {
            self.registry.sync(settings);
        }

        let specs = self.registry.frame_specs(settings, &metrics);
        let mut moved = 0;
        for spec in &specs {
            let Some(realized) = draw(spec) else {
                continue;
            };
            if spec.movable && self.registry.write_back(&spec.identity, realized, settings) {
                moved += 1;
            }
        }

        FrameReport {
            metrics,
            drawn: specs.len(),
            moved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::panels;
    use crate::input::testing::FakeInput;
    use crate::input::Control;
    use crate::window_behavior::testing::FakeWindow;
    use crate::window_behavior::WindowStyle;
    use std::time::Duration;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_frame_draws_enabled_panels_only() {
        let mut settings = Settings::default();
        settings.panel_mut(panels::WATERMARK).unwrap().enabled = false;
        let mut engine = OverlayEngine::new(&settings);
        let mut window = FakeWindow::default();
        let input = FakeInput::default();

        let mut seen = Vec::new();
        let report = engine.frame(Instant::now(), &mut settings, &input, &mut window, |spec| {
            seen.push(spec.identity.clone());
            None
        });

        assert_eq!(report.drawn, panels::CATALOG.len() - 1);
        assert!(!seen.iter().any(|id| id == panels::WATERMARK));
    }

    #[test]
    fn test_frame_applies_window_behavior() {
        let mut settings = Settings::default();
        settings.overlay_click_through = true;
        let mut engine = OverlayEngine::new(&settings);
        let mut window = FakeWindow::default();
        let input = FakeInput::default();
        let base = Instant::now();

        engine.frame(base, &mut settings, &input, &mut window, |_| None);
        engine.frame(at(base, 16), &mut settings, &input, &mut window, |_| None);

        assert!(window.style.contains(WindowStyle::TOPMOST));
        assert!(window.style.contains(WindowStyle::TRANSPARENT));
        assert_eq!(window.writes, 1);
    }

    #[test]
    fn test_frame_writes_back_movable_positions() {
        let mut settings = Settings::default();
        settings.panel_mut(panels::KEYSTROKE).unwrap().movable = false;
        let pinned = settings.panel(panels::KEYSTROKE).unwrap().pos;
        let mut engine = OverlayEngine::new(&settings);
        let mut window = FakeWindow::default();
        let input = FakeInput::default();

        let report = engine.frame(Instant::now(), &mut settings, &input, &mut window, |spec| {
            Some(Position::new(spec.pos.x + 5.0, spec.pos.y))
        });

        assert_eq!(report.moved, panels::CATALOG.len() - 1);
        assert_eq!(settings.panel(panels::KEYSTROKE).unwrap().pos, pinned);
        let fps = settings.panel(panels::FPS_COUNTER).unwrap().pos;
        assert_eq!(fps, Position::new(25.0, 20.0));
    }

    #[test]
    fn test_clicks_counted_on_press_edges() {
        let settings = Settings::default();
        let mut engine = OverlayEngine::new(&settings);
        let mut input = FakeInput::default();
        let base = Instant::now();

        let mut last = MetricSnapshot::default();
        for (i, down) in [true, true, false, true, false, true].into_iter().enumerate() {
            input.set_pointer(down);
            last = engine.sample(at(base, i as u64 * 10), &input);
        }
        assert_eq!(last.cps, 3);

        input.set_pointer(false);
        assert_eq!(engine.sample(at(base, 2000), &input).cps, 0);
    }

    #[test]
    fn test_fps_reported_after_half_second() {
        let settings = Settings::default();
        let mut engine = OverlayEngine::new(&settings);
        let input = FakeInput::default();
        let base = Instant::now();

        let mut snapshot = MetricSnapshot::default();
        for frame in 0..=30u64 {
            snapshot = engine.sample(base + Duration::from_micros(frame * 16_667), &input);
        }
        assert!((snapshot.fps - 60.0).abs() < 0.5, "fps={}", snapshot.fps);
    }

    #[test]
    fn test_keys_and_reach_in_snapshot() {
        let settings = Settings::default();
        let mut engine = OverlayEngine::new(&settings);
        let input = FakeInput::holding(&[Control::Back]);
        engine.set_reach(3.0);

        let snapshot = engine.sample(Instant::now(), &input);
        assert!(snapshot.keys.back);
        assert!(!snapshot.keys.forward);
        assert_eq!(snapshot.reach, 3.0);
    }

    #[test]
    fn test_new_panels_picked_up() {
        let mut settings = Settings::default();
        let mut engine = OverlayEngine::new(&settings);
        settings.panels.insert("EXTRA".to_string(), Default::default());
        let mut window = FakeWindow::default();
        let input = FakeInput::default();

        let mut texts = Vec::new();
        engine.frame(Instant::now(), &mut settings, &input, &mut window, |spec| {
            texts.push(spec.text.clone());
            None
        });
        assert!(texts.iter().any(|t| t == "EXTRA"));
        assert_eq!(engine.registry().identities().count(), panels::CATALOG.len() + 1);
    }
}
