//! Physical key to logical key tables
//!
//! Several physical keys may alias one logical key. Hex digits are the
//! same on every map; command keys are mnemonic letters (`I` for input,
//! `W` for write, `S` for switches) that do not collide with `A`-`F`.

use elfpanel_core::traits::{KeyCode, UnknownKey};

/// Key code tables for Linux input devices (`linux/input-event-codes.h`)
pub mod code {
    pub const KEY_ESC: u16 = 1;
    pub const KEY_1: u16 = 2;
    pub const KEY_9: u16 = 10;
    pub const KEY_0: u16 = 11;
    pub const KEY_BACKSPACE: u16 = 14;
    pub const KEY_Q: u16 = 16;
    pub const KEY_W: u16 = 17;
    pub const KEY_E: u16 = 18;
    pub const KEY_R: u16 = 19;
    pub const KEY_I: u16 = 23;
    pub const KEY_ENTER: u16 = 28;
    pub const KEY_A: u16 = 30;
    pub const KEY_S: u16 = 31;
    pub const KEY_D: u16 = 32;
    pub const KEY_F: u16 = 33;
    pub const KEY_H: u16 = 35;
    pub const KEY_L: u16 = 38;
    pub const KEY_C: u16 = 46;
    pub const KEY_B: u16 = 48;
    pub const KEY_KP7: u16 = 71;
    pub const KEY_KP8: u16 = 72;
    pub const KEY_KP9: u16 = 73;
    pub const KEY_KP4: u16 = 75;
    pub const KEY_KP5: u16 = 76;
    pub const KEY_KP6: u16 = 77;
    pub const KEY_KP1: u16 = 79;
    pub const KEY_KP2: u16 = 80;
    pub const KEY_KP3: u16 = 81;
    pub const KEY_KP0: u16 = 82;
    pub const KEY_KPENTER: u16 = 96;
}

/// A keymap resolves raw key values from one kind of source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Keymap {
    /// Bytes from a serial terminal
    Terminal,
    /// `EV_KEY` codes from an input device
    InputEvent,
}

impl Keymap {
    /// Resolve a raw key value
    pub fn resolve(self, raw: u16) -> Result<KeyCode, UnknownKey> {
        match self {
            Keymap::Terminal => u8::try_from(raw)
                .map_err(|_| UnknownKey(raw))
                .and_then(terminal),
            Keymap::InputEvent => input_event(raw),
        }
    }
}

/// Resolve a byte typed on a serial terminal
pub fn terminal(byte: u8) -> Result<KeyCode, UnknownKey> {
    if let Some(key) = KeyCode::from_hex_char(char::from(byte)) {
        return Ok(key);
    }
    match byte {
        b'\r' | b'i' | b'I' => Ok(KeyCode::Enter),
        b'w' | b'W' => Ok(KeyCode::ToggleWrite),
        b'r' | b'R' | b'h' | b'H' | b'g' | b'G' => Ok(KeyCode::RunOrWait),
        b'l' | b'L' | b'm' | b'M' => Ok(KeyCode::EditAddress),
        b's' | b'S' => Ok(KeyCode::SwitchMonitor),
        // Backspace and DEL
        0x08 | 0x7F => Ok(KeyCode::Exit),
        // Ctrl-C
        b'q' | b'Q' | 0x03 => Ok(KeyCode::Quit),
        _ => Err(UnknownKey(u16::from(byte))),
    }
}

/// Resolve an input device key code
///
/// Only key presses should be passed in; releases and autorepeat are the
/// caller's concern.
pub fn input_event(raw: u16) -> Result<KeyCode, UnknownKey> {
    use code::*;

    let key = match raw {
        KEY_0 | KEY_KP0 => KeyCode::Digit(0),
        KEY_1..=KEY_9 => KeyCode::Digit((raw - KEY_1 + 1) as u8),
        KEY_KP1 => KeyCode::Digit(1),
        KEY_KP2 => KeyCode::Digit(2),
        KEY_KP3 => KeyCode::Digit(3),
        KEY_KP4 => KeyCode::Digit(4),
        KEY_KP5 => KeyCode::Digit(5),
        KEY_KP6 => KeyCode::Digit(6),
        KEY_KP7 => KeyCode::Digit(7),
        KEY_KP8 => KeyCode::Digit(8),
        KEY_KP9 => KeyCode::Digit(9),
        KEY_A => KeyCode::Digit(0xA),
        KEY_B => KeyCode::Digit(0xB),
        KEY_C => KeyCode::Digit(0xC),
        KEY_D => KeyCode::Digit(0xD),
        KEY_E => KeyCode::Digit(0xE),
        KEY_F => KeyCode::Digit(0xF),
        KEY_ENTER | KEY_KPENTER | KEY_I => KeyCode::Enter,
        KEY_W => KeyCode::ToggleWrite,
        KEY_R | KEY_H => KeyCode::RunOrWait,
        KEY_L => KeyCode::EditAddress,
        KEY_S => KeyCode::SwitchMonitor,
        KEY_BACKSPACE => KeyCode::Exit,
        KEY_Q | KEY_ESC => KeyCode::Quit,
        _ => return Err(UnknownKey(raw)),
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_hex_digits() {
        assert_eq!(terminal(b'0'), Ok(KeyCode::Digit(0)));
        assert_eq!(terminal(b'9'), Ok(KeyCode::Digit(9)));
        assert_eq!(terminal(b'a'), Ok(KeyCode::Digit(0xA)));
        assert_eq!(terminal(b'F'), Ok(KeyCode::Digit(0xF)));
    }

    #[test]
    fn test_terminal_commands() {
        assert_eq!(terminal(b'\r'), Ok(KeyCode::Enter));
        assert_eq!(terminal(b'i'), Ok(KeyCode::Enter));
        assert_eq!(terminal(b'W'), Ok(KeyCode::ToggleWrite));
        assert_eq!(terminal(b'r'), Ok(KeyCode::RunOrWait));
        assert_eq!(terminal(b'h'), Ok(KeyCode::RunOrWait));
        assert_eq!(terminal(b'l'), Ok(KeyCode::EditAddress));
        assert_eq!(terminal(b's'), Ok(KeyCode::SwitchMonitor));
        assert_eq!(terminal(0x7F), Ok(KeyCode::Exit));
        assert_eq!(terminal(b'q'), Ok(KeyCode::Quit));
    }

    #[test]
    fn test_terminal_unknown() {
        assert_eq!(terminal(b'z'), Err(UnknownKey(u16::from(b'z'))));
        assert_eq!(terminal(b' '), Err(UnknownKey(0x20)));
        assert_eq!(terminal(0xFF), Err(UnknownKey(0xFF)));
    }

    #[test]
    fn test_input_event_digits() {
        assert_eq!(input_event(code::KEY_1), Ok(KeyCode::Digit(1)));
        assert_eq!(input_event(code::KEY_9), Ok(KeyCode::Digit(9)));
        assert_eq!(input_event(code::KEY_0), Ok(KeyCode::Digit(0)));
        assert_eq!(input_event(code::KEY_KP7), Ok(KeyCode::Digit(7)));
        assert_eq!(input_event(code::KEY_E), Ok(KeyCode::Digit(0xE)));
    }

    #[test]
    fn test_input_event_commands() {
        assert_eq!(input_event(code::KEY_KPENTER), Ok(KeyCode::Enter));
        assert_eq!(input_event(code::KEY_BACKSPACE), Ok(KeyCode::Exit));
        assert_eq!(input_event(code::KEY_ESC), Ok(KeyCode::Quit));
        assert_eq!(input_event(0x1FF), Err(UnknownKey(0x1FF)));
    }

    #[test]
    fn test_keymap_resolve() {
        assert_eq!(Keymap::Terminal.resolve(u16::from(b'w')), Ok(KeyCode::ToggleWrite));
        assert_eq!(Keymap::Terminal.resolve(0x1000), Err(UnknownKey(0x1000)));
        assert_eq!(Keymap::InputEvent.resolve(code::KEY_W), Ok(KeyCode::ToggleWrite));
    }
}
