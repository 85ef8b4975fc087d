use anyhow::{Context, Result};
use evdev::{Device, KeyCode};
use tracing::{debug, info};

use super::{Control, InputProvider};
use crate::constants::{paths, permissions};

/// Global input state read straight from /dev/input devices
pub struct EvdevInput {
    keyboards: Vec<Device>,
    pointers: Vec<Device>,
}

impl EvdevInput {
    /// Open every keyboard (has W) and pointer (has left button) device
    pub fn open() -> Result<Self> {
        info!(path = %paths::DEV_INPUT, "Scanning for input devices...");

        let mut keyboards = Vec::new();
        let mut pointers = Vec::new();

        for entry in std::fs::read_dir(paths::DEV_INPUT)
            .context(format!("Failed to read {} - are you in the '{}' group?", paths::DEV_INPUT, permissions::INPUT_GROUP))?
        {
            let path = entry?.path();

            // Devices we cannot open (permissions, non-event nodes) are skipped
            let Ok(device) = Device::open(&path) else {
                continue;
            };
            let Some(keys) = device.supported_keys() else {
                continue;
            };

            if keys.contains(KeyCode::KEY_W) {
                info!(device_path = %path.display(), name = ?device.name(), "Found keyboard device");
                keyboards.push(device);
            } else if keys.contains(KeyCode::BTN_LEFT) {
                info!(device_path = %path.display(), name = ?device.name(), "Found pointer device");
                pointers.push(device);
            }
        }

        if keyboards.is_empty() {
            anyhow::bail!(
                "No keyboard device found. Ensure you're in '{}' group:\n\
                 {}\n\
                 Then log out and back in.",
                permissions::INPUT_GROUP,
                permissions::ADD_TO_INPUT_GROUP
            )
        }

        info!(keyboards = keyboards.len(), pointers = pointers.len(), "Polling input device(s)");
        Ok(Self { keyboards, pointers })
    }

    fn any_held(devices: &[Device], key: KeyCode) -> bool {
        devices.iter().any(|device| match device.get_key_state() {
            Ok(state) => state.contains(key),
            Err(e) => {
                debug!(device = ?device.name(), error = %e, "Failed to read key state");
                false
            }
        })
    }
}

fn key_for(control: Control) -> KeyCode {
    match control {
        Control::Forward => KeyCode::KEY_W,
        Control::Left => KeyCode::KEY_A,
        Control::Back => KeyCode::KEY_S,
        Control::Right => KeyCode::KEY_D,
        Control::Jump => KeyCode::KEY_SPACE,
    }
}

impl InputProvider for EvdevInput {
    fn name(&self) -> &'static str {
        "evdev"
    }

    fn is_active(&self, control: Control) -> bool {
        Self::any_held(&self.keyboards, key_for(control))
    }

    fn primary_pointer_down(&self) -> bool {
        // Some mice report buttons through their keyboard interface as well
        Self::any_held(&self.pointers, KeyCode::BTN_LEFT)
            || Self::any_held(&self.keyboards, KeyCode::BTN_LEFT)
    }
}
