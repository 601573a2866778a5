//! GPIO front panel lines
//!
//! Drives the four control lines and the switch bus with plain GPIO
//! pins and reads the LED bus, Q and EF3 back. The control and switch
//! pins must be readable while driven (e.g. `Flex` pins on the RP2040) so
//! a target switch pulling a line to ground can be detected.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use elfpanel_core::traits::{Level, Line, LineDriver, LineError, Signal};

/// The four control line pins
pub struct ControlPins<P> {
    pub write: P,
    pub wait: P,
    pub clear: P,
    pub input: P,
}

impl<P> ControlPins<P> {
    fn pin_mut(&mut self, line: Line) -> &mut P {
        match line {
            Line::Write => &mut self.write,
            Line::Wait => &mut self.wait,
            Line::Clear => &mut self.clear,
            Line::In => &mut self.input,
        }
    }
}

/// Read-only signal pins
pub struct SignalPins<I> {
    pub q: I,
    pub ef3: I,
}

/// GPIO line driver
///
/// Bus pin `n` carries data bit `n`. Pulse timing uses the supplied
/// delay as a busy wait.
pub struct GpioLines<P, S, I, D> {
    control: ControlPins<P>,
    switches: [S; 8],
    leds: [I; 8],
    signals: SignalPins<I>,
    delay: D,
}

impl<P, S, I, D> GpioLines<P, S, I, D>
where
    P: InputPin + OutputPin,
    S: InputPin + OutputPin,
    I: InputPin,
    D: DelayNs,
{
    /// Create a new GPIO line driver
    ///
    /// Pin levels are left untouched; the panel releases every line
    /// during start-up.
    pub fn new(
        control: ControlPins<P>,
        switches: [S; 8],
        leds: [I; 8],
        signals: SignalPins<I>,
        delay: D,
    ) -> Self {
        Self {
            control,
            switches,
            leds,
            signals,
            delay,
        }
    }

    /// Release the pins
    pub fn release(self) -> (ControlPins<P>, [S; 8], [I; 8], SignalPins<I>, D) {
        (self.control, self.switches, self.leds, self.signals, self.delay)
    }
}

fn read_byte<T: InputPin>(pins: &mut [T; 8]) -> Result<u8, LineError> {
    let mut value = 0u8;
    for (bit, pin) in pins.iter_mut().enumerate() {
        if pin.is_high().map_err(|_| LineError::BusRead)? {
            value |= 1 << bit;
        }
    }
    Ok(value)
}

impl<P, S, I, D> LineDriver for GpioLines<P, S, I, D>
where
    P: InputPin + OutputPin,
    S: InputPin + OutputPin,
    I: InputPin,
    D: DelayNs,
{
    fn set_line(&mut self, line: Line, level: Level) -> Result<(), LineError> {
        let pin = self.control.pin_mut(line);
        let result = match level {
            Level::High => pin.set_high(),
            Level::Low => pin.set_low(),
        };
        result.map_err(|_| LineError::Control(line))
    }

    fn read_line(&mut self, line: Line) -> Result<Level, LineError> {
        let high = self
            .control
            .pin_mut(line)
            .is_high()
            .map_err(|_| LineError::Control(line))?;
        Ok(Level::from(high))
    }

    fn read_bus(&mut self) -> Result<u8, LineError> {
        read_byte(&mut self.leds)
    }

    fn write_bus(&mut self, value: u8) -> Result<(), LineError> {
        for (bit, pin) in self.switches.iter_mut().enumerate() {
            let result = if value & (1 << bit) != 0 {
                pin.set_high()
            } else {
                pin.set_low()
            };
            result.map_err(|_| LineError::BusWrite)?;
        }
        Ok(())
    }

    fn read_switch_bus(&mut self) -> Result<u8, LineError> {
        read_byte(&mut self.switches)
    }

    fn read_signal(&mut self, signal: Signal) -> Result<Level, LineError> {
        let pin = match signal {
            Signal::Q => &mut self.signals.q,
            Signal::Ef3 => &mut self.signals.ef3,
        };
        let high = pin.is_high().map_err(|_| LineError::Signal(signal))?;
        Ok(Level::from(high))
    }

    fn pulse(&mut self, line: Line, hold_us: u32) -> Result<(), LineError> {
        let active = line.active_level();
        self.set_line(line, active)?;
        self.delay.delay_us(hold_us);
        self.set_line(line, active.inverted())?;
        self.delay.delay_us(hold_us);
        Ok(())
    }
}
