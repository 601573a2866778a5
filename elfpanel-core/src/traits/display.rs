//! Hex display driver trait
//!
//! The panel display is three positions of two hex digits each, every
//! digit with its own decimal point. Position 0 is the rightmost.

/// Number of two-digit positions on the display
pub const DISPLAY_POSITIONS: u8 = 3;

/// Errors that can occur while rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The display device could not be reached (NAK, bus error)
    Unavailable,
    /// Position outside 0..DISPLAY_POSITIONS
    InvalidPosition(u8),
}

/// Trait for the two-digit hex display
pub trait HexDisplay {
    /// Show `value` as two hex digits at `position`
    ///
    /// - `high_dot`: decimal point after the high nibble digit
    /// - `low_dot`: decimal point after the low nibble digit
    fn render(
        &mut self,
        value: u8,
        high_dot: bool,
        low_dot: bool,
        position: u8,
    ) -> Result<(), DisplayError>;
}
