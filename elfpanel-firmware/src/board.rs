//! Board wiring
//!
//! Raspberry Pi Pico pin assignments for the front panel header:
//!
//! | Signal            | GPIO                  |
//! |-------------------|-----------------------|
//! | UART0 TX / RX     | 0 / 1                 |
//! | Q, EF3 (inputs)   | 2, 3                  |
//! | I2C0 SDA / SCL    | 4 / 5                 |
//! | WRITE, WAIT       | 6, 7                  |
//! | CLEAR, IN         | 8, 9                  |
//! | Switches D0-D7    | 10-17                 |
//! | LEDs D0-D7        | 18-22, 26, 27, 28     |

use embassy_rp::gpio::{Flex, Input};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::Delay;

use elfpanel_core::traits::{DisplayError, HexDisplay};
use elfpanel_drivers::display::{Is31fl3730, NoDisplay};
use elfpanel_drivers::keys::SerialKeys;
use elfpanel_drivers::lines::{ControlPins, GpioLines, SignalPins};

/// Line driver on the Pico pins
pub type BoardLines = GpioLines<Flex<'static>, Flex<'static>, Input<'static>, Delay>;

/// Terminal keys on UART0
pub type BoardKeys = SerialKeys<BufferedUartRx, Delay>;

/// Micro Dot pHAT on I2C0
pub type BoardMatrix = Is31fl3730<I2c<'static, I2C0, Blocking>>;

/// Display selected by `[display] enabled`
pub enum BoardDisplay {
    Matrix(BoardMatrix),
    Absent(NoDisplay),
}

impl HexDisplay for BoardDisplay {
    fn render(
        &mut self,
        value: u8,
        high_dot: bool,
        low_dot: bool,
        position: u8,
    ) -> Result<(), DisplayError> {
        match self {
            BoardDisplay::Matrix(d) => d.render(value, high_dot, low_dot, position),
            BoardDisplay::Absent(d) => d.render(value, high_dot, low_dot, position),
        }
    }
}

/// Turn a pin into a driven output that starts released (high)
///
/// The input buffer stays enabled, so the pad level can be read back.
fn released_output(mut pin: Flex<'static>) -> Flex<'static> {
    pin.set_high();
    pin.set_as_output();
    pin
}

/// Build the line driver from the header pins
pub fn lines(
    control: ControlPins<Flex<'static>>,
    switches: [Flex<'static>; 8],
    leds: [Input<'static>; 8],
    signals: SignalPins<Input<'static>>,
) -> BoardLines {
    let control = ControlPins {
        write: released_output(control.write),
        wait: released_output(control.wait),
        clear: released_output(control.clear),
        input: released_output(control.input),
    };
    GpioLines::new(control, switches.map(released_output), leds, signals, Delay)
}
