//! Point-in-time input polling
//!
//! The overlay asks "is this held right now" once per frame instead of
//! consuming an event queue. Backends answer from global device state so the
//! panels keep updating while another program has focus.

mod evdev_input;
mod x11_input;

pub use evdev_input::EvdevInput;
pub use x11_input::X11Input;

use tracing::{error, info, warn};

use crate::constants::{paths, permissions};

/// Controls shown on the keystroke panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Left,
    Back,
    Right,
    Jump,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::Forward,
        Control::Left,
        Control::Back,
        Control::Right,
        Control::Jump,
    ];
}

/// Source of instantaneous input state
pub trait InputProvider {
    /// Backend name for logs and the launcher status line
    fn name(&self) -> &'static str;

    /// Whether `control` is held at this instant
    fn is_active(&self, control: Control) -> bool;

    /// Whether the primary pointer button is held at this instant
    fn primary_pointer_down(&self) -> bool;
}

/// Backend used when no input source could be opened; reports nothing held
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleInput;

impl InputProvider for IdleInput {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_active(&self, _control: Control) -> bool {
        false
    }

    fn primary_pointer_down(&self) -> bool {
        false
    }
}

/// Check if evdev devices are readable (user has input group permissions)
pub fn check_permissions() -> bool {
    std::fs::read_dir(paths::DEV_INPUT).is_ok()
}

/// Log why evdev polling is unavailable
fn print_permission_error() {
    error!(path = %paths::DEV_INPUT, "Cannot access input devices");
    error!(group = %permissions::INPUT_GROUP, "Global key polling requires group membership");
    error!(command = %permissions::ADD_TO_INPUT_GROUP, "Add user to input group");
    error!("  Then log out and back in");
}

/// Pick the best available backend: evdev, then X11, then nothing
pub fn detect() -> Box<dyn InputProvider> {
    if check_permissions() {
        match EvdevInput::open() {
            Ok(input) => {
                info!(backend = input.name(), "Input polling enabled");
                return Box::new(input);
            }
            Err(e) => warn!(error = %e, "evdev input unavailable, trying X11"),
        }
    } else {
        print_permission_error();
    }

    match X11Input::connect() {
        Ok(input) => {
            info!(backend = input.name(), "Input polling enabled");
            Box::new(input)
        }
        Err(e) => {
            warn!(error = ?e, "X11 input unavailable");
            warn!(continuing = true, "Continuing without keystroke/CPS input...");
            Box::new(IdleInput)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_input_reports_nothing() {
        let input = IdleInput;
        assert!(Control::ALL.iter().all(|c| !input.is_active(*c)));
        assert!(!input.primary_pointer_down());
    }
}
