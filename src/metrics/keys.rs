use crate::input::{Control, InputProvider};

/// Which movement controls are held right now
///
/// Overwritten on every poll; presses shorter than one frame are not seen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub left: bool,
    pub back: bool,
    pub right: bool,
    pub jump: bool,
}

impl KeyState {
    /// Snapshot the five controls from `input`
    pub fn poll(input: &dyn InputProvider) -> Self {
        Self {
            forward: input.is_active(Control::Forward),
            left: input.is_active(Control::Left),
            back: input.is_active(Control::Back),
            right: input.is_active(Control::Right),
            jump: input.is_active(Control::Jump),
        }
    }

    /// Keystroke panel text, e.g. `W [P]  A [ ]  S [ ]  D [ ]  Space [ ]`
    pub fn glyphs(&self) -> String {
        let mark = |held: bool| if held { "[P]" } else { "[ ]" };
        format!(
            "W {}  A {}  S {}  D {}  Space {}",
            mark(self.forward),
            mark(self.left),
            mark(self.back),
            mark(self.right),
            mark(self.jump),
        )
    }
}
