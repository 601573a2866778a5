//! Line protocol driver trait
//!
//! The target is controlled through four active-low control lines, an
//! eight bit switch bus (panel to target) and an eight bit LED bus
//! (target to panel). There is no address bus: the only way to move the
//! target's address register is to pulse IN. Two more pins (Q and EF3)
//! are only ever read, for diagnostics.

/// Front panel control lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Memory write enable (low = writes allowed)
    Write,
    /// WAIT (low = target halted)
    Wait,
    /// CLEAR (low = target held in reset)
    Clear,
    /// IN (low pulse = DMA in cycle, advances the address register)
    In,
}

impl Line {
    /// All control lines, in the order they are released at start-up
    pub const ALL: [Line; 4] = [Line::Write, Line::Wait, Line::Clear, Line::In];

    /// Electrical level at which the line is asserted
    ///
    /// Every line on the Elf front panel header is active low.
    pub const fn active_level(self) -> Level {
        Level::Low
    }
}

/// Read-only target signals on the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    /// Q flip-flop output (serial TX on monitors that bit-bang)
    Q,
    /// EF3 flag input (serial RX)
    Ef3,
}

/// Electrical line level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// The opposite level
    pub const fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Errors raised by the line protocol driver
///
/// All of them leave the target in an unknown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// A control line could not be driven or read
    Control(Line),
    /// Driving the switch bus failed
    BusWrite,
    /// Reading the LED bus failed
    BusRead,
    /// A read-only signal could not be read
    Signal(Signal),
}

/// Raw signal primitives of the front panel connector
pub trait LineDriver {
    /// Drive a control line to a level
    fn set_line(&mut self, line: Line, level: Level) -> Result<(), LineError>;

    /// Read the actual level present on a control line
    ///
    /// This reads the pad, not the driven value, so a line shorted by a
    /// switch on the target reads low even when driven high.
    fn read_line(&mut self, line: Line) -> Result<Level, LineError>;

    /// Read the target's output port (the LED byte)
    fn read_bus(&mut self) -> Result<u8, LineError>;

    /// Drive the switch byte towards the target
    fn write_bus(&mut self, value: u8) -> Result<(), LineError>;

    /// Read the levels actually present on the switch bus pads
    ///
    /// Differs from the last written byte when a data switch on the
    /// target pulls a bit to ground.
    fn read_switch_bus(&mut self) -> Result<u8, LineError>;

    /// Read the raw level of a read-only signal
    fn read_signal(&mut self, signal: Signal) -> Result<Level, LineError>;

    /// Assert a line, hold it for `hold_us`, release it and hold again
    fn pulse(&mut self, line: Line, hold_us: u32) -> Result<(), LineError>;
}

/// Convenience operations in terms of asserted/released lines
pub trait LineDriverExt: LineDriver {
    /// Drive a line to its active level
    fn assert_line(&mut self, line: Line) -> Result<(), LineError> {
        self.set_line(line, line.active_level())
    }

    /// Drive a line to its inactive level
    fn release_line(&mut self, line: Line) -> Result<(), LineError> {
        self.set_line(line, line.active_level().inverted())
    }

    /// Assert or release a line
    fn drive_line(&mut self, line: Line, asserted: bool) -> Result<(), LineError> {
        if asserted {
            self.assert_line(line)
        } else {
            self.release_line(line)
        }
    }

    /// Check whether a line currently reads at its active level
    fn is_asserted(&mut self, line: Line) -> Result<bool, LineError> {
        Ok(self.read_line(line)? == line.active_level())
    }
}

// Blanket implementation for all LineDriver types
impl<T: LineDriver> LineDriverExt for T {}
