//! Per-panel layout record

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::lenient;

use crate::color::Rgba;
use crate::constants::{layout, panels};
use crate::types::Position;

/// Layout and styling of one HUD panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelLayout {
    pub enabled: bool,
    /// Draw `bg_color` behind the panel; when off the background is fully transparent
    pub background: bool,
    /// Size multiplier, kept in `MIN_SCALE..=MAX_SCALE`
    pub scale: f32,
    pub movable: bool,
    /// Text colour
    pub color: Rgba,
    /// Background colour, alpha doubles as background opacity
    #[serde(rename = "bgColor")]
    pub bg_color: Rgba,
    /// Last realized top-left corner on the overlay
    #[serde(serialize_with = "serialize_pos")]
    pub pos: Position,
}

/// A panel object as stored on disk
///
/// Every field is optional. Colours and position stay raw arrays so a short
/// array only overwrites the channels it covers.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelPatch {
    #[serde(deserialize_with = "lenient")]
    enabled: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    background: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    scale: Option<f32>,
    #[serde(deserialize_with = "lenient")]
    movable: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    color: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    bg_color: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pos: Option<Vec<Value>>,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::default_at(0)
    }
}

impl PanelLayout {
    /// Default layout for the `index`-th panel, cascading down the overlay
    pub fn default_at(index: usize) -> Self {
        let column = index / layout::DEFAULT_ROWS_PER_COLUMN;
        let row = index % layout::DEFAULT_ROWS_PER_COLUMN;
        Self {
            enabled: true,
            background: true,
            scale: layout::DEFAULT_SCALE,
            movable: true,
            color: Rgba(layout::DEFAULT_COLOR),
            bg_color: Rgba(layout::DEFAULT_BG_COLOR),
            pos: Position::new(
                layout::DEFAULT_ORIGIN_X + column as f32 * layout::DEFAULT_COLUMN_STEP,
                layout::DEFAULT_ORIGIN_Y + row as f32 * layout::DEFAULT_ROW_STEP,
            ),
        }
    }

    /// Default layout for a panel identity
    ///
    /// Catalog panels get their own slot in the cascade, anything else starts
    /// at the origin.
    pub fn default_for(identity: &str) -> Self {
        let index = panels::CATALOG
            .iter()
            .position(|name| *name == identity)
            .unwrap_or(0);
        Self::default_at(index)
    }

    /// Overwrite the fields present in `patch`; absent fields keep their value
    pub fn merge(&mut self, patch: PanelPatch) {
        if let Some(v) = patch.enabled {
            self.enabled = v;
        }
        if let Some(v) = patch.background {
            self.background = v;
        }
        if let Some(v) = patch.scale {
            self.scale = v;
        }
        if let Some(v) = patch.movable {
            self.movable = v;
        }
        if let Some(values) = patch.color {
            self.color.merge_from(&values);
        }
        if let Some(values) = patch.bg_color {
            self.bg_color.merge_from(&values);
        }
        if let Some(values) = patch.pos {
            if let Some(x) = values.first().and_then(Value::as_f64) {
                self.pos.x = x as f32;
            }
            if let Some(y) = values.get(1).and_then(Value::as_f64) {
                self.pos.y = y as f32;
            }
        }
        self.clamp();
    }

    /// Keep every numeric field inside its documented range
    pub fn clamp(&mut self) {
        self.scale = if self.scale.is_finite() {
            self.scale.clamp(layout::MIN_SCALE, layout::MAX_SCALE)
        } else {
            layout::DEFAULT_SCALE
        };
        self.color = self.color.clamped(Rgba(layout::DEFAULT_COLOR));
        self.bg_color = self.bg_color.clamped(Rgba(layout::DEFAULT_BG_COLOR));
        if !self.pos.is_finite() {
            self.pos = Position::new(layout::DEFAULT_ORIGIN_X, layout::DEFAULT_ORIGIN_Y);
        }
    }

    /// Background colour actually painted this frame
    pub fn effective_background(&self) -> Rgba {
        if self.background {
            self.bg_color
        } else {
            self.bg_color.with_alpha(0.0)
        }
    }
}

fn serialize_pos<S>(pos: &Position, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    <[f32; 2]>::from(*pos).serialize(serializer)
}
