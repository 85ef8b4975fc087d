use std::collections::VecDeque;
use std::time::Instant;

use crate::constants::sampling::CPS_WINDOW;

/// Timestamps of recent primary-button presses
///
/// Entries older than [`CPS_WINDOW`] are dropped on every [`count`](Self::count),
/// which keeps the history bounded by the click rate.
#[derive(Debug, Default, Clone)]
pub struct ClickHistory {
    clicks: VecDeque<Instant>,
}

impl ClickHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a press at `now`; timestamps must not go backwards
    pub fn record_click(&mut self, now: Instant) {
        self.clicks.push_back(now);
    }

    /// Prune stale presses and return how many happened in the trailing second
    pub fn count(&mut self, now: Instant) -> usize {
        while let Some(&oldest) = self.clicks.front() {
            if now.saturating_duration_since(oldest) > CPS_WINDOW {
                self.clicks.pop_front();
            } else {
                break;
            }
        }
        self.clicks.len()
    }
}

/// Turns point-in-time button samples into press transitions
#[derive(Debug, Default, Clone, Copy)]
pub struct ClickEdgeDetector {
    was_down: bool,
}

impl ClickEdgeDetector {
    /// Feed the current button state; true when it just went from up to down
    pub fn update(&mut self, is_down: bool) -> bool {
        let pressed = is_down && !self.was_down;
        self.was_down = is_down;
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_trailing_window_count() {
        let base = Instant::now();
        let mut history = ClickHistory::new();
        for ms in [0, 200, 400, 1100] {
            history.record_click(at(base, ms));
        }
        // 0 is 1150ms old and gets pruned, 200/400/1100 remain
        assert_eq!(history.count(at(base, 1150)), 3);
    }

    #[test]
    fn test_pruning_is_permanent() {
        let base = Instant::now();
        let mut history = ClickHistory::new();
        for ms in [0, 200, 400, 1100] {
            history.record_click(at(base, ms));
        }
        assert_eq!(history.count(at(base, 1450)), 1);
        assert_eq!(history.clicks.len(), 1);
        assert_eq!(history.count(at(base, 5000)), 0);
        assert!(history.clicks.is_empty());
    }

    #[test]
    fn test_click_exactly_one_second_old_counts() {
        let base = Instant::now();
        let mut history = ClickHistory::new();
        history.record_click(base);
        assert_eq!(history.count(at(base, 1000)), 1);
        assert_eq!(history.count(at(base, 1001)), 0);
    }

    #[test]
    fn test_empty_history() {
        let mut history = ClickHistory::new();
        assert_eq!(history.count(Instant::now()), 0);
    }

    #[test]
    fn test_edge_detector_only_fires_on_press() {
        let mut edge = ClickEdgeDetector::default();
        let samples = [false, true, true, false, true, false, false];
        let presses: Vec<bool> = samples.iter().map(|&down| edge.update(down)).collect();
        assert_eq!(presses, [false, true, false, false, true, false, false]);
    }
}
