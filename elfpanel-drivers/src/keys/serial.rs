//! Serial terminal key source
//!
//! Polls a byte stream (a buffered UART) for key presses. Bytes arrive
//! in the background, so the wait is a sliced busy-wait that checks the
//! receive buffer between slices.

use elfpanel_core::traits::{KeyCode, KeySource};
use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady};

use super::keymap::Keymap;

/// Default wait between receive buffer checks
pub const DEFAULT_TICK_US: u32 = 1000;

/// Key source over a serial byte stream
pub struct SerialKeys<R, D> {
    rx: R,
    delay: D,
    keymap: Keymap,
    tick_us: u32,
    dropped: u32,
    errors: u32,
}

impl<R: Read + ReadReady, D: DelayNs> SerialKeys<R, D> {
    /// Create a key source using the terminal keymap
    pub fn new(rx: R, delay: D) -> Self {
        Self::with_keymap(rx, delay, Keymap::Terminal)
    }

    pub fn with_keymap(rx: R, delay: D, keymap: Keymap) -> Self {
        Self {
            rx,
            delay,
            keymap,
            tick_us: DEFAULT_TICK_US,
            dropped: 0,
            errors: 0,
        }
    }

    /// Set the wait between receive buffer checks (minimum 1 us)
    pub fn set_tick_us(&mut self, tick_us: u32) {
        self.tick_us = tick_us.max(1);
    }

    /// Bytes received that map to no key
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Receive errors (framing, overrun) seen so far
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Drain the receive buffer up to the first recognised key
    fn read_key(&mut self) -> Option<KeyCode> {
        loop {
            match self.rx.read_ready() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(_) => {
                    self.errors = self.errors.wrapping_add(1);
                    return None;
                }
            }

            let mut byte = [0u8; 1];
            match self.rx.read(&mut byte) {
                Ok(1) => match self.keymap.resolve(u16::from(byte[0])) {
                    Ok(key) => return Some(key),
                    Err(_) => self.dropped = self.dropped.wrapping_add(1),
                },
                Ok(_) => return None,
                Err(_) => {
                    self.errors = self.errors.wrapping_add(1);
                    return None;
                }
            }
        }
    }
}

impl<R: Read + ReadReady, D: DelayNs> KeySource for SerialKeys<R, D> {
    fn poll(&mut self, timeout_us: u32) -> Option<KeyCode> {
        let mut waited = 0u32;
        loop {
            if let Some(key) = self.read_key() {
                return Some(key);
            }
            if waited >= timeout_us {
                return None;
            }
            let slice = self.tick_us.min(timeout_us - waited);
            self.delay.delay_us(slice);
            waited += slice;
        }
    }
}
