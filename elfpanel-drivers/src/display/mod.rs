//! Hex display drivers

pub mod font;
pub mod is31fl3730;

pub use is31fl3730::Is31fl3730;

use elfpanel_core::traits::{DisplayError, HexDisplay};

/// Stand-in when no display is fitted
pub struct NoDisplay;

impl HexDisplay for NoDisplay {
    fn render(&mut self, _: u8, _: bool, _: bool, _: u8) -> Result<(), DisplayError> {
        Ok(())
    }
}
