//! Display presenter
//!
//! Maps the panel state to the three display positions:
//!
//! ```text
//!   position 2     position 1     position 0
//!  [ addr hi ]    [ addr lo ]    [  data   ]
//!   Run  Wait     Addr  Switch   Write  Half
//! ```
//!
//! The second row shows what each decimal point means (high digit dot
//! first). Load mode lights no mode dot. The Write dot follows the WRITE
//! line, so it is dark while a mode suspends writes.

use super::mode::Mode;
use crate::traits::{DisplayError, HexDisplay};

/// Everything the presenter looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelView {
    pub mode: Mode,
    /// Shadow address counter
    pub addr: u16,
    /// Address entry accumulator (shown in Address mode)
    pub entry_address: u16,
    /// First nibble of a pair typed, second outstanding
    pub entry_pending: bool,
    /// Last byte sampled from the target's output port
    pub data: u8,
    /// Byte currently driven on the switches
    pub switches: u8,
    pub write_protect: bool,
}

/// One display position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitPair {
    pub value: u8,
    pub high_dot: bool,
    pub low_dot: bool,
}

/// Contents of the whole display, index = position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFrame {
    pub positions: [DigitPair; 3],
}

/// Build the frame for a panel state
pub fn present(view: &PanelView) -> DisplayFrame {
    let data = match view.mode {
        Mode::Switch => view.switches,
        // Writable load mode: show what the next IN will store
        Mode::Load if !view.write_protect => view.switches,
        _ => view.data,
    };

    let address = match view.mode {
        Mode::Address => view.entry_address,
        _ => view.addr,
    };
    let [addr_hi, addr_lo] = address.to_be_bytes();

    DisplayFrame {
        positions: [
            DigitPair {
                value: data,
                high_dot: !view.write_protect && !view.mode.write_suspended(),
                low_dot: view.entry_pending,
            },
            DigitPair {
                value: addr_lo,
                high_dot: view.mode == Mode::Address,
                low_dot: view.mode == Mode::Switch,
            },
            DigitPair {
                value: addr_hi,
                high_dot: view.mode == Mode::Run,
                low_dot: view.mode == Mode::Wait,
            },
        ],
    }
}

/// Push a frame to the display
///
/// Every position is attempted even if an earlier one fails; the first
/// error is returned.
pub fn render_frame<D: HexDisplay>(frame: &DisplayFrame, display: &mut D) -> Result<(), DisplayError> {
    let mut result = Ok(());
    for (position, pair) in frame.positions.iter().enumerate() {
        let rendered = display.render(pair.value, pair.high_dot, pair.low_dot, position as u8);
        if result.is_ok() {
            result = rendered;
        }
    }
    result
}
