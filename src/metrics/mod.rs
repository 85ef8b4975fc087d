//! Live metric samplers feeding the HUD panels
//!
//! Every sampler is plain state advanced by the render loop; none of them
//! spawn threads or read the clock on their own.

mod cps;
mod fps;
mod keys;
mod reach;

pub use cps::{ClickEdgeDetector, ClickHistory};
pub use fps::FrameRateSampler;
pub use keys::KeyState;
pub use reach::ReachValue;

/// Values sampled for one overlay frame
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MetricSnapshot {
    pub fps: f32,
    pub cps: usize,
    pub keys: KeyState,
    pub reach: f32,
}
