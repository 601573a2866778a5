//! Recording fakes for the hardware traits

use std::vec::Vec;

use crate::traits::{
    DisplayError, HexDisplay, KeyCode, KeySource, Level, Line, LineDriver, LineError, Signal,
};

/// One call made against [`RecordingLines`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Set(Line, Level),
    Read(Line),
    ReadBus,
    WriteBus(u8),
    ReadSwitchBus,
    ReadSignal(Signal),
    Pulse(Line, u32),
}

/// Fake line driver that records every call
pub struct RecordingLines {
    pub calls: Vec<Call>,
    /// WRITE line asserted at the time of each IN pulse
    pub in_pulses: Vec<bool>,
    /// Byte returned by `read_bus`
    pub leds: u8,
    /// Last byte driven with `write_bus`
    pub switches: u8,
    levels: [Level; 4],
    /// Lines that read back low regardless of the driven level
    pub stuck_low: Vec<Line>,
    /// Switch bus bits that read back low
    pub bus_stuck_low: u8,
    /// Level returned for Q
    pub q: Level,
    /// Level returned for EF3
    pub ef3: Level,
    /// Fail every call once this many calls have been made
    pub fail_after: Option<usize>,
    /// Simulated target memory; when non-empty, IN pulses read or write
    /// it at the simulated R0
    pub memory: Vec<u8>,
    r0: u16,
}

impl RecordingLines {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            in_pulses: Vec::new(),
            leds: 0,
            switches: 0xFF,
            levels: [Level::High; 4],
            stuck_low: Vec::new(),
            bus_stuck_low: 0,
            q: Level::Low,
            ef3: Level::High,
            fail_after: None,
            memory: Vec::new(),
            r0: 0,
        }
    }

    pub fn level(&self, line: Line) -> Level {
        self.levels[index(line)]
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.in_pulses.clear();
    }

    pub fn pulses(&self, line: Line) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Pulse(l, _) if *l == line))
            .count()
    }

    /// Number of times `line` was driven to `level`
    pub fn sets(&self, line: Line, level: Level) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == Call::Set(line, level))
            .count()
    }

    /// Calls that drive the hardware (reads excluded)
    pub fn writes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| !matches!(c, Call::Read(_) | Call::ReadBus | Call::ReadSwitchBus | Call::ReadSignal(_)))
            .count()
    }

    fn record(&mut self, call: Call) -> Result<(), LineError> {
        if let Some(limit) = self.fail_after {
            if self.calls.len() >= limit {
                return Err(match call {
                    Call::Set(line, _) | Call::Read(line) | Call::Pulse(line, _) => {
                        LineError::Control(line)
                    }
                    Call::ReadBus | Call::ReadSwitchBus => LineError::BusRead,
                    Call::WriteBus(_) => LineError::BusWrite,
                    Call::ReadSignal(signal) => LineError::Signal(signal),
                });
            }
        }
        self.calls.push(call);
        Ok(())
    }
}

fn index(line: Line) -> usize {
    match line {
        Line::Write => 0,
        Line::Wait => 1,
        Line::Clear => 2,
        Line::In => 3,
    }
}

impl LineDriver for RecordingLines {
    fn set_line(&mut self, line: Line, level: Level) -> Result<(), LineError> {
        self.record(Call::Set(line, level))?;
        self.levels[index(line)] = level;
        Ok(())
    }

    fn read_line(&mut self, line: Line) -> Result<Level, LineError> {
        self.record(Call::Read(line))?;
        if self.stuck_low.contains(&line) {
            Ok(Level::Low)
        } else {
            Ok(self.levels[index(line)])
        }
    }

    fn read_bus(&mut self) -> Result<u8, LineError> {
        self.record(Call::ReadBus)?;
        Ok(self.leds)
    }

    fn write_bus(&mut self, value: u8) -> Result<(), LineError> {
        self.record(Call::WriteBus(value))?;
        self.switches = value;
        Ok(())
    }

    fn read_switch_bus(&mut self) -> Result<u8, LineError> {
        self.record(Call::ReadSwitchBus)?;
        Ok(self.switches & !self.bus_stuck_low)
    }

    fn read_signal(&mut self, signal: Signal) -> Result<Level, LineError> {
        self.record(Call::ReadSignal(signal))?;
        Ok(match signal {
            Signal::Q => self.q,
            Signal::Ef3 => self.ef3,
        })
    }

    fn pulse(&mut self, line: Line, hold_us: u32) -> Result<(), LineError> {
        self.record(Call::Pulse(line, hold_us))?;
        match line {
            Line::Wait if self.levels[index(Line::Clear)] == Level::Low => self.r0 = 0,
            Line::In => {
                let writing = self.levels[index(Line::Write)] == Level::Low;
                self.in_pulses.push(writing);
                if !self.memory.is_empty() {
                    let cell = usize::from(self.r0) % self.memory.len();
                    if writing {
                        self.memory[cell] = self.switches;
                    } else {
                        self.leds = self.memory[cell];
                    }
                    self.r0 = self.r0.wrapping_add(1);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Fake display that records rendered digits
pub struct RecordingDisplay {
    /// (value, high_dot, low_dot, position)
    pub renders: Vec<(u8, bool, bool, u8)>,
    pub fail: bool,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            renders: Vec::new(),
            fail: false,
        }
    }

    /// Most recent render at `position`
    pub fn at(&self, position: u8) -> Option<(u8, bool, bool)> {
        self.renders
            .iter()
            .rev()
            .find(|r| r.3 == position)
            .map(|r| (r.0, r.1, r.2))
    }
}

impl HexDisplay for RecordingDisplay {
    fn render(
        &mut self,
        value: u8,
        high_dot: bool,
        low_dot: bool,
        position: u8,
    ) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Unavailable);
        }
        self.renders.push((value, high_dot, low_dot, position));
        Ok(())
    }
}

/// Key source replaying a fixed script, then timing out
pub struct ScriptedKeys {
    keys: Vec<Option<KeyCode>>,
    pub polls: usize,
}

impl ScriptedKeys {
    pub fn new(keys: &[Option<KeyCode>]) -> Self {
        let mut keys = keys.to_vec();
        keys.reverse();
        Self { keys, polls: 0 }
    }
}

impl KeySource for ScriptedKeys {
    fn poll(&mut self, _timeout_us: u32) -> Option<KeyCode> {
        self.polls += 1;
        self.keys.pop().flatten()
    }
}
