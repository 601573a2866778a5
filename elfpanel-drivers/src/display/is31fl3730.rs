//! IS31FL3730 matrix driver (Pimoroni Micro Dot pHAT)
//!
//! Each display position is one IS31FL3730 with two 5x7 matrices and a
//! decimal point per matrix. Position `n` answers at `base_address + n`;
//! position 0 is the rightmost chip.
//!
//! # Register protocol
//!
//! Single byte register writes (`[register, value]`):
//! - CONFIG: both matrices on, 8x8 mode
//! - Matrix 1 (right digit, low nibble): row-major, one register per row
//! - Matrix 2 (left digit, high nibble): column-major, one register per
//!   column
//! - UPDATE: any value latches the data registers

use elfpanel_core::traits::{DisplayError, HexDisplay, DISPLAY_POSITIONS};
use embedded_hal::i2c::I2c;

use super::font;

/// IS31FL3730 register addresses
pub mod reg {
    /// Operation mode
    pub const CONFIG: u8 = 0x00;
    /// Matrix 1 data, 8 registers
    pub const MATRIX_1: u8 = 0x01;
    /// Latch the data registers
    pub const UPDATE: u8 = 0x0C;
    /// Row current
    pub const LIGHTING: u8 = 0x0D;
    /// Matrix 2 data, 8 registers
    pub const MATRIX_2: u8 = 0x0E;
    /// Brightness (0-128)
    pub const PWM: u8 = 0x19;
    /// Reset all registers to default
    pub const RESET: u8 = 0xFF;
}

/// CONFIG value: matrix 1 and matrix 2 on, 8x8
const MATRIX_1_AND_2: u8 = 0x18;

/// Decimal point of matrix 1: row 6, bit 7
const DOT_1: (usize, u8) = (6, 0x80);
/// Decimal point of matrix 2: column 7, bit 6
const DOT_2: (usize, u8) = (7, 0x40);

/// Micro Dot pHAT driver
pub struct Is31fl3730<I> {
    i2c: I,
    base_address: u8,
}

impl<I: I2c> Is31fl3730<I> {
    /// Create a driver for chips at `base_address`, `base_address + 1`, ...
    pub fn new(i2c: I, base_address: u8) -> Self {
        Self { i2c, base_address }
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }

    /// Reset every chip and blank the display
    pub fn init(&mut self) -> Result<(), DisplayError> {
        for position in 0..DISPLAY_POSITIONS {
            let address = self.address(position)?;
            self.write(address, reg::RESET, 0)?;
            self.write(address, reg::CONFIG, MATRIX_1_AND_2)?;
            self.write(address, reg::UPDATE, 0)?;
        }
        Ok(())
    }

    fn address(&self, position: u8) -> Result<u8, DisplayError> {
        if position >= DISPLAY_POSITIONS {
            return Err(DisplayError::InvalidPosition(position));
        }
        Ok(self.base_address.wrapping_add(position))
    }

    fn write(&mut self, address: u8, register: u8, value: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(address, &[register, value])
            .map_err(|_| DisplayError::Unavailable)
    }
}

/// Register contents for one chip: (matrix 1, matrix 2)
pub fn encode(value: u8, high_dot: bool, low_dot: bool) -> ([u8; 8], [u8; 8]) {
    let mut matrix_1 = [0u8; 8];
    matrix_1[..7].copy_from_slice(&font::rows(value & 0x0F));
    if low_dot {
        matrix_1[DOT_1.0] |= DOT_1.1;
    }

    let mut matrix_2 = [0u8; 8];
    matrix_2[..5].copy_from_slice(&font::columns(value >> 4));
    if high_dot {
        matrix_2[DOT_2.0] |= DOT_2.1;
    }

    (matrix_1, matrix_2)
}

impl<I: I2c> HexDisplay for Is31fl3730<I> {
    fn render(
        &mut self,
        value: u8,
        high_dot: bool,
        low_dot: bool,
        position: u8,
    ) -> Result<(), DisplayError> {
        let address = self.address(position)?;
        let (matrix_1, matrix_2) = encode(value, high_dot, low_dot);

        self.write(address, reg::CONFIG, MATRIX_1_AND_2)?;
        for (offset, row) in (0u8..).zip(matrix_1) {
            self.write(address, reg::MATRIX_1 + offset, row)?;
        }
        for (offset, column) in (0u8..).zip(matrix_2) {
            self.write(address, reg::MATRIX_2 + offset, column)?;
        }
        self.write(address, reg::UPDATE, 0)
    }
}
