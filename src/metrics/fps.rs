use crate::constants::sampling::{FPS_INTERVAL_EPSILON, FPS_REPORT_INTERVAL};

/// Frame rate averaged over fixed reporting windows
///
/// The reported value only changes when a window completes, so the readout
/// does not flicker every frame.
#[derive(Debug, Default, Clone)]
pub struct FrameRateSampler {
    elapsed: f32,
    frames: u32,
    rate: f32,
}

impl FrameRateSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one frame that took `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            return;
        }
        self.elapsed += dt;
        self.frames += 1;

        if self.elapsed + FPS_INTERVAL_EPSILON >= FPS_REPORT_INTERVAL {
            // elapsed is at least the report interval here, never zero
            self.rate = self.frames as f32 / self.elapsed;
            self.elapsed = 0.0;
            self.frames = 0;
        }
    }

    /// Most recently finalized rate, 0 until the first window completes
    pub fn current_rate(&self) -> f32 {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_before_first_window() {
        let mut fps = FrameRateSampler::new();
        for _ in 0..10 {
            fps.tick(1.0 / 60.0);
        }
        assert_eq!(fps.current_rate(), 0.0);
    }

    #[test]
    fn test_sixty_fps_after_half_second() {
        let mut fps = FrameRateSampler::new();
        for _ in 0..30 {
            fps.tick(1.0 / 60.0);
        }
        assert!((fps.current_rate() - 60.0).abs() < 0.01, "rate={}", fps.current_rate());

        // The value holds until the next window completes
        assert!((fps.current_rate() - 60.0).abs() < 0.01);
        fps.tick(1.0 / 30.0);
        assert!((fps.current_rate() - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_next_window_overwrites() {
        let mut fps = FrameRateSampler::new();
        for _ in 0..30 {
            fps.tick(1.0 / 60.0);
        }
        for _ in 0..15 {
            fps.tick(1.0 / 30.0);
        }
        assert!((fps.current_rate() - 30.0).abs() < 0.01, "rate={}", fps.current_rate());
    }

    #[test]
    fn test_zero_dt_never_finalizes() {
        let mut fps = FrameRateSampler::new();
        for _ in 0..1000 {
            fps.tick(0.0);
        }
        assert_eq!(fps.current_rate(), 0.0);
    }

    #[test]
    fn test_invalid_dt_ignored() {
        let mut fps = FrameRateSampler::new();
        fps.tick(f32::NAN);
        fps.tick(-1.0);
        fps.tick(f32::INFINITY);
        assert_eq!(fps.current_rate(), 0.0);
    }

    #[test]
    fn test_single_long_frame() {
        let mut fps = FrameRateSampler::new();
        fps.tick(2.0);
        assert_eq!(fps.current_rate(), 0.5);
    }
}
