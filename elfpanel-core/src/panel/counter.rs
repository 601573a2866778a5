//! Shadow copy of the target's address register
//!
//! The Elf has no address bus on its front panel. R0 is cleared by the
//! reset sequence and incremented by each IN pulse in load mode, so the
//! panel tracks it by counting pulses. Nothing is ever read back.

use crate::traits::{Line, LineDriver, LineDriverExt, LineError};

/// Address shadow counter
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressCounter {
    addr: u16,
    hold_us: u32,
}

impl AddressCounter {
    /// Create a counter at address 0 with the given pulse hold time
    pub const fn new(hold_us: u32) -> Self {
        Self { addr: 0, hold_us }
    }

    /// Current shadow address
    pub fn addr(&self) -> u16 {
        self.addr
    }

    /// Issue one IN pulse and count it
    ///
    /// The shadow only moves when the pulse went out; a failed pulse
    /// leaves the target in an unknown state and the error is fatal.
    pub fn advance<L: LineDriver>(&mut self, lines: &mut L) -> Result<(), LineError> {
        lines.pulse(Line::In, self.hold_us)?;
        self.addr = self.addr.wrapping_add(1);
        Ok(())
    }

    /// Reset the target into load mode at address 0
    ///
    /// CLEAR is asserted first, then WAIT is asserted, released and
    /// asserted again: the release with CLEAR low is the reset cycle that
    /// clears R0, the final assertion enters load mode.
    pub fn reset_to_zero<L: LineDriver>(&mut self, lines: &mut L) -> Result<(), LineError> {
        lines.assert_line(Line::Clear)?;
        lines.pulse(Line::Wait, self.hold_us)?;
        lines.assert_line(Line::Wait)?;
        self.addr = 0;
        Ok(())
    }

    /// Reset and count up to `target`
    ///
    /// Issues exactly `target` IN pulses after the reset.
    pub fn seek<L: LineDriver>(&mut self, lines: &mut L, target: u16) -> Result<(), LineError> {
        self.reset_to_zero(lines)?;
        for _ in 0..target {
            self.advance(lines)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingLines};
    use crate::traits::Level;
    use proptest::prelude::*;

    #[test]
    fn test_advance_pulses_in_once() {
        let mut lines = RecordingLines::new();
        let mut counter = AddressCounter::new(100);

        counter.advance(&mut lines).unwrap();

        assert_eq!(counter.addr(), 1);
        assert_eq!(lines.calls, [Call::Pulse(Line::In, 100)]);
    }

    #[test]
    fn test_advance_wraps() {
        let mut lines = RecordingLines::new();
        let mut counter = AddressCounter::new(1);
        counter.addr = 0xFFFF;

        counter.advance(&mut lines).unwrap();
        assert_eq!(counter.addr(), 0);
    }

    #[test]
    fn test_reset_sequence_order() {
        let mut lines = RecordingLines::new();
        let mut counter = AddressCounter::new(100);
        counter.addr = 0x42;

        counter.reset_to_zero(&mut lines).unwrap();

        assert_eq!(counter.addr(), 0);
        assert_eq!(
            lines.calls,
            [
                Call::Set(Line::Clear, Level::Low),
                Call::Pulse(Line::Wait, 100),
                Call::Set(Line::Wait, Level::Low),
            ]
        );
        // Reset never reads the hardware back
        assert!(!lines
            .calls
            .iter()
            .any(|c| matches!(c, Call::Read(_) | Call::ReadBus)));
    }

    #[test]
    fn test_failed_pulse_does_not_count() {
        let mut lines = RecordingLines::new();
        lines.fail_after = Some(0);
        let mut counter = AddressCounter::new(100);

        assert_eq!(
            counter.advance(&mut lines),
            Err(LineError::Control(Line::In))
        );
        assert_eq!(counter.addr(), 0);
    }

    #[test]
    fn test_seek_pulses_exactly_target_times() {
        let mut lines = RecordingLines::new();
        let mut counter = AddressCounter::new(100);
        counter.addr = 0x0777;

        counter.seek(&mut lines, 0x1234).unwrap();

        assert_eq!(counter.addr(), 0x1234);
        assert_eq!(lines.pulses(Line::In), 0x1234);
        assert_eq!(lines.pulses(Line::Wait), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_advance_counts_pulses(start in any::<u16>(), n in 0usize..140_000) {
            let mut lines = RecordingLines::new();
            let mut counter = AddressCounter::new(0);
            counter.addr = start;

            counter.reset_to_zero(&mut lines).unwrap();
            lines.clear();
            for _ in 0..n {
                counter.advance(&mut lines).unwrap();
            }

            prop_assert_eq!(lines.pulses(Line::In), n);
            prop_assert_eq!(counter.addr() as usize, n % 65536);
        }

        #[test]
        fn prop_advance_without_reset_is_modular(start in any::<u16>(), n in 0u32..70_000) {
            let mut lines = RecordingLines::new();
            let mut counter = AddressCounter::new(0);
            counter.addr = start;

            for _ in 0..n {
                counter.advance(&mut lines).unwrap();
            }

            prop_assert_eq!(counter.addr() as u32, (start as u32 + n) % 65536);
        }
    }
}
