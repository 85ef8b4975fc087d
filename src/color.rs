//! RGBA colours as stored in the settings file (four floats in 0..=1)

use serde::{Deserialize, Serialize};

/// Unmultiplied RGBA colour, every channel in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    #[cfg(test)]
    pub fn alpha(&self) -> f32 {
        self.0[3]
    }

    /// Same colour with a different alpha channel
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.0[3] = clamp_channel(alpha, 0.0);
        self
    }

    /// Force every channel into range; non-finite channels fall back to `fallback`
    pub fn clamped(self, fallback: Rgba) -> Self {
        let mut out = self.0;
        for (channel, default) in out.iter_mut().zip(fallback.0) {
            *channel = clamp_channel(*channel, default);
        }
        Rgba(out)
    }

    /// Overwrite the leading channels with whatever `values` supplies
    ///
    /// A short sequence only touches the channels it covers, entries that are
    /// not numbers leave their channel unchanged.
    pub fn merge_from(&mut self, values: &[serde_json::Value]) {
        for (channel, value) in self.0.iter_mut().zip(values) {
            if let Some(v) = value.as_f64() {
                *channel = v as f32;
            }
        }
    }
}

fn clamp_channel(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

impl From<Rgba> for egui::Color32 {
    fn from(c: Rgba) -> Self {
        let [r, g, b, a] = c.0;
        egui::Rgba::from_rgba_unmultiplied(r, g, b, a).into()
    }
}
