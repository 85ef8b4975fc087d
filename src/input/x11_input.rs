use anyhow::{Context, Result};
use tracing::{debug, warn};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{ConnectionExt as _, KeyButMask, Keycode, Window};
use x11rb::rust_connection::RustConnection;

use super::{Control, InputProvider};
use crate::constants::keysyms;

/// Global input state queried from the X server
///
/// Uses `QueryKeymap` and `QueryPointer`, which report the state of the whole
/// display regardless of which window has focus.
pub struct X11Input {
    conn: RustConnection,
    root: Window,
    keycodes: [Option<Keycode>; 5],
}

impl X11Input {
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None).context("Failed to connect to X11 server")?;
        let root = conn.setup().roots[screen_num].root;
        let keycodes = lookup_keycodes(&conn).context("Failed to read X11 keyboard mapping")?;

        for (control, keycode) in Control::ALL.iter().zip(keycodes) {
            if keycode.is_none() {
                warn!(control = ?control, "No keycode mapped for control, it will never show as held");
            }
        }

        Ok(Self { conn, root, keycodes })
    }

    fn keycode(&self, control: Control) -> Option<Keycode> {
        let index = Control::ALL.iter().position(|c| *c == control)?;
        self.keycodes[index]
    }
}

/// Resolve the keysym of every control to the first keycode producing it
fn lookup_keycodes(conn: &RustConnection) -> Result<[Option<Keycode>; 5]> {
    let setup = conn.setup();
    let min = setup.min_keycode;
    let count = setup.max_keycode - min + 1;
    let mapping = conn
        .get_keyboard_mapping(min, count)
        .context("Failed to request keyboard mapping")?
        .reply()
        .context("Failed to get reply for keyboard mapping")?;

    let per_keycode = usize::from(mapping.keysyms_per_keycode);
    if per_keycode == 0 {
        anyhow::bail!("X server reported zero keysyms per keycode");
    }

    let find = |keysym: u32| -> Option<Keycode> {
        mapping
            .keysyms
            .chunks(per_keycode)
            .position(|syms| syms.contains(&keysym))
            .and_then(|offset| u8::try_from(offset).ok())
            .map(|offset| min + offset)
    };

    Ok(Control::ALL.map(|control| find(keysym_for(control))))
}

fn keysym_for(control: Control) -> u32 {
    match control {
        Control::Forward => keysyms::XK_W,
        Control::Left => keysyms::XK_A,
        Control::Back => keysyms::XK_S,
        Control::Right => keysyms::XK_D,
        Control::Jump => keysyms::XK_SPACE,
    }
}

/// Whether `keycode` is set in a `QueryKeymap` bit vector
fn keymap_has(keys: &[u8; 32], keycode: Keycode) -> bool {
    keys[usize::from(keycode / 8)] & (1 << (keycode % 8)) != 0
}

impl InputProvider for X11Input {
    fn name(&self) -> &'static str {
        "x11"
    }

    fn is_active(&self, control: Control) -> bool {
        let Some(keycode) = self.keycode(control) else {
            return false;
        };
        match self.conn.query_keymap().map(|cookie| cookie.reply()) {
            Ok(Ok(reply)) => keymap_has(&reply.keys, keycode),
            Ok(Err(e)) => {
                debug!(error = %e, "QueryKeymap reply failed");
                false
            }
            Err(e) => {
                debug!(error = %e, "QueryKeymap request failed");
                false
            }
        }
    }

    fn primary_pointer_down(&self) -> bool {
        match self.conn.query_pointer(self.root).map(|cookie| cookie.reply()) {
            Ok(Ok(reply)) => u16::from(reply.mask) & u16::from(KeyButMask::BUTTON1) != 0,
            Ok(Err(e)) => {
                debug!(error = %e, "QueryPointer reply failed");
                false
            }
            Err(e) => {
                debug!(error = %e, "QueryPointer request failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_has() {
        let mut keys = [0u8; 32];
        // keycode 25 is W on a standard evdev keymap: byte 3, bit 1
        keys[3] = 0b0000_0010;
        assert!(keymap_has(&keys, 25));
        assert!(!keymap_has(&keys, 24));
        assert!(!keymap_has(&keys, 65));
    }

    #[test]
    fn test_keysyms_are_lowercase_latin() {
        assert_eq!(keysym_for(Control::Forward), u32::from(b'w'));
        assert_eq!(keysym_for(Control::Jump), u32::from(b' '));
    }
}
