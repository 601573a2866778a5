//! Key source trait
//!
//! Physical keys (terminal bytes, input-event codes) are resolved to
//! logical [`KeyCode`]s by a keymap before reaching the panel.

/// Logical front panel keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// Hex digit 0x0-0xF
    Digit(u8),
    /// IN key / commit address entry
    Enter,
    /// Toggle memory protect
    ToggleWrite,
    /// Run from load, halt when running, resume when halted
    RunOrWait,
    /// Enter or commit address entry; reload from run/wait
    EditAddress,
    /// Monitor the switches while the target keeps its state
    SwitchMonitor,
    /// Leave switch monitor
    Exit,
    /// End the polling loop
    Quit,
}

impl KeyCode {
    /// Hex digit key for a character, case-insensitive
    pub fn from_hex_char(c: char) -> Option<Self> {
        c.to_digit(16).map(|d| KeyCode::Digit(d as u8))
    }
}

/// A physical key that has no logical meaning on the panel
///
/// Carries the raw byte or event code. Key sources drop these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownKey(pub u16);

/// Source of key presses
pub trait KeySource {
    /// Wait up to `timeout_us` for the next recognised key
    ///
    /// Returns `None` when the timeout expires. Unrecognised keys are
    /// swallowed and do not end the wait early.
    fn poll(&mut self, timeout_us: u32) -> Option<KeyCode>;
}
