use crate::constants::panels;
use crate::metrics::MetricSnapshot;

/// What a panel displays, resolved once from its identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Fps,
    Cps,
    Keystrokes,
    Reach,
    Watermark,
    /// Any other identity: the panel shows its own name
    Label,
}

impl PanelKind {
    pub fn from_identity(identity: &str) -> Self {
        match identity {
            panels::FPS_COUNTER => PanelKind::Fps,
            panels::CPS_COUNTER => PanelKind::Cps,
            panels::KEYSTROKE => PanelKind::Keystrokes,
            panels::REACH_COUNTER => PanelKind::Reach,
            panels::WATERMARK => PanelKind::Watermark,
            _ => PanelKind::Label,
        }
    }

    /// Text shown by a panel of this kind for the given sample
    pub fn content(&self, identity: &str, metrics: &MetricSnapshot) -> String {
        match self {
            PanelKind::Fps => format!("FPS: {:.1}", metrics.fps),
            PanelKind::Cps => format!("CPS: {}", metrics.cps),
            PanelKind::Keystrokes => metrics.keys.glyphs(),
            PanelKind::Reach => format!("Reach: {:.2}m", metrics.reach),
            PanelKind::Watermark => panels::WATERMARK_TEXT.to_string(),
            PanelKind::Label => identity.to_string(),
        }
    }
}
