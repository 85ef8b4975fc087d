/// Last reported reach distance in metres
///
/// Nothing in this crate measures reach. The value is fed from outside through
/// [`set`](Self::set) and shown as-is; it stays 0 until something reports one.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ReachValue {
    metres: f32,
}

impl ReachValue {
    /// Store a new distance; negative or non-finite input is ignored
    #[allow(dead_code)] // reached only through OverlayEngine::set_reach
    pub fn set(&mut self, metres: f32) {
        if metres.is_finite() && metres >= 0.0 {
            self.metres = metres;
        }
    }

    pub fn get(&self) -> f32 {
        self.metres
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut reach = ReachValue::default();
        assert_eq!(reach.get(), 0.0);
        reach.set(3.25);
        assert_eq!(reach.get(), 3.25);
        reach.set(f32::NAN);
        reach.set(-1.0);
        assert_eq!(reach.get(), 3.25);
    }
}
