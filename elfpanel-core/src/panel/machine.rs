//! Front panel state machine
//!
//! Key handling is split in two. [`transition`] is a pure function of the
//! current mode, the key and a few flags; it returns the next mode and a
//! list of [`Command`]s. [`FrontPanel`] owns the line driver and the
//! address counter and carries the commands out in order.

use heapless::Vec;

use super::counter::AddressCounter;
use super::entry::{Entry, HexEntryBuffer};
use super::error::{InitError, PanelError};
use super::mode::Mode;
use super::presenter::{present, render_frame, PanelView};
use crate::config::{PanelConfig, PolicyConfig};
use crate::traits::{HexDisplay, KeyCode, KeySource, Level, Line, LineDriver, LineDriverExt, Signal};

/// Upper bound on commands produced by one transition
pub const MAX_COMMANDS: usize = 4;

/// Line protocol side effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// One IN pulse, address + 1
    Advance,
    /// Read the target's output port into the data shadow
    SampleData,
    /// Reset into load mode at address 0
    ResetAddress,
    /// Reset, then count up to the address
    SeekAddress(u16),
    /// WRITE line: true = memory writes enabled
    DriveWrite(bool),
    /// WAIT line: true = asserted (halted)
    DriveWait(bool),
    /// CLEAR line: true = asserted (reset)
    DriveClear(bool),
    /// Put a byte on the switches
    DriveSwitches(u8),
}

/// Outcome of a key in a mode
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub next: Mode,
    pub write_protect: bool,
    pub commands: Vec<Command, MAX_COMMANDS>,
}

/// Inputs to [`transition`] besides mode and key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransitionContext {
    pub write_protect: bool,
    /// Byte currently on the switches
    pub switches: u8,
    /// Address typed so far in Address mode
    pub entry_address: u16,
}

/// Whether the polling loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flow {
    Continue,
    Quit,
}

/// Snapshot of the target's front panel signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TargetStatus {
    /// Output port (LEDs)
    pub leds: u8,
    /// Q output level
    pub q: bool,
    /// EF3 input level
    pub ef3: bool,
    /// Input port (switch pads as read back)
    pub switches: u8,
    pub writing: bool,
    pub waiting: bool,
    pub clearing: bool,
    pub in_active: bool,
}

fn commands(list: &[Command]) -> Vec<Command, MAX_COMMANDS> {
    debug_assert!(list.len() <= MAX_COMMANDS, "transition row exceeds MAX_COMMANDS");
    list.iter().copied().take(MAX_COMMANDS).collect()
}

/// Pure transition table for command keys
///
/// Digit keys are handled by the hex entry buffer and never change the
/// mode here; neither does `Quit`, which ends the loop instead. Any pair
/// not in the table leaves the mode unchanged with no commands.
pub fn transition(
    mode: Mode,
    key: KeyCode,
    ctx: &TransitionContext,
    policy: &PolicyConfig,
) -> Transition {
    use Command::*;

    let wp = ctx.write_protect;
    let stay = |list: &[Command], write_protect: bool| Transition {
        next: mode,
        write_protect,
        commands: commands(list),
    };
    let go = |next: Mode, list: &[Command], write_protect: bool| Transition {
        next,
        write_protect,
        commands: commands(list),
    };
    let to_switch = || go(Mode::Switch, &[DriveWrite(false), DriveSwitches(0xFF)], wp);

    match (mode, key) {
        // Load
        (Mode::Load, KeyCode::Enter) => {
            if wp {
                stay(&[Advance, SampleData], wp)
            } else {
                stay(&[Advance], wp)
            }
        }
        (Mode::Load, KeyCode::ToggleWrite) => {
            if wp {
                // Now writable: the switches must hold the byte to store
                stay(&[DriveSwitches(ctx.switches), DriveWrite(true)], false)
            } else {
                stay(&[DriveWrite(false), SampleData], true)
            }
        }
        (Mode::Load, KeyCode::RunOrWait) => {
            go(Mode::Run, &[DriveWrite(true), DriveWait(false), DriveClear(false)], false)
        }
        (Mode::Load, KeyCode::EditAddress) => go(Mode::Address, &[DriveWrite(false)], wp),
        (Mode::Load, KeyCode::SwitchMonitor) => to_switch(),

        // Run
        (Mode::Run, KeyCode::ToggleWrite) => stay(&[DriveWrite(wp)], !wp),
        (Mode::Run, KeyCode::RunOrWait) => go(Mode::Wait, &[DriveWait(true)], wp),
        (Mode::Run, KeyCode::EditAddress) => go(Mode::Load, &[ResetAddress, DriveWrite(!wp)], wp),
        (Mode::Run, KeyCode::SwitchMonitor) => to_switch(),

        // Wait
        (Mode::Wait, KeyCode::ToggleWrite) => stay(&[DriveWrite(wp)], !wp),
        (Mode::Wait, KeyCode::RunOrWait) => go(Mode::Run, &[DriveWait(false)], wp),
        (Mode::Wait, KeyCode::EditAddress) => go(Mode::Load, &[ResetAddress, DriveWrite(!wp)], wp),
        (Mode::Wait, KeyCode::SwitchMonitor) => to_switch(),

        // Address
        (Mode::Address, KeyCode::Enter | KeyCode::EditAddress) => {
            let write_protect = if policy.restore_write_state_on_address_commit {
                wp
            } else {
                true
            };
            go(
                Mode::Load,
                &[SeekAddress(ctx.entry_address), DriveWrite(!write_protect), SampleData],
                write_protect,
            )
        }

        // Switch
        (Mode::Switch, KeyCode::Exit) => {
            if policy.prefetch_on_switch_exit {
                go(Mode::Load, &[DriveWrite(false), ResetAddress, Advance, SampleData], true)
            } else {
                go(Mode::Load, &[DriveWrite(false), ResetAddress, SampleData], true)
            }
        }

        _ => stay(&[], wp),
    }
}

/// The front panel controller
///
/// Owns the line driver for the life of the program. The display is
/// passed in for each refresh since it is observational only.
pub struct FrontPanel<L> {
    lines: L,
    mode: Mode,
    counter: AddressCounter,
    entry: HexEntryBuffer,
    write_protect: bool,
    switches: u8,
    data: u8,
    policy: PolicyConfig,
}

impl<L: LineDriver> FrontPanel<L> {
    /// Create a panel in Load mode, read-only, at address 0
    ///
    /// No hardware access happens until [`FrontPanel::start`].
    pub fn new(lines: L, config: &PanelConfig) -> Self {
        Self {
            lines,
            mode: Mode::Load,
            counter: AddressCounter::new(config.timing.pulse_hold_us),
            entry: HexEntryBuffer::new(),
            write_protect: true,
            switches: 0xFF,
            data: 0,
            policy: config.policy,
        }
    }

    /// Bring the target into load mode at the configured start address
    ///
    /// All control lines are released and must read back high: a low
    /// line means a switch on the target is closed and the panel would
    /// be fighting it. Then the target is reset, the switches are
    /// released (0xFF) and must read back high too, and the counter
    /// seeks to the start address.
    pub fn start(&mut self) -> Result<(), PanelError> {
        for line in Line::ALL {
            self.lines.release_line(line).map_err(InitError::Driver)?;
        }
        for line in [Line::Wait, Line::Clear, Line::In] {
            if self.lines.is_asserted(line).map_err(InitError::Driver)? {
                return Err(InitError::LineStuck(line).into());
            }
        }

        self.counter.reset_to_zero(&mut self.lines)?;
        self.lines.write_bus(0xFF)?;
        self.switches = 0xFF;
        let grounded = !self.lines.read_switch_bus()?;
        if grounded != 0 {
            return Err(InitError::BusStuck(grounded).into());
        }
        if self.policy.start_address != 0 {
            self.counter.seek(&mut self.lines, self.policy.start_address)?;
        }
        self.data = self.lines.read_bus()?;

        self.mode = Mode::Load;
        self.write_protect = true;
        self.entry.abandon();
        Ok(())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn addr(&self) -> u16 {
        self.counter.addr()
    }

    pub fn write_protect(&self) -> bool {
        self.write_protect
    }

    pub fn switches(&self) -> u8 {
        self.switches
    }

    /// Last byte sampled from the target
    pub fn data(&self) -> u8 {
        self.data
    }

    pub fn entry(&self) -> &HexEntryBuffer {
        &self.entry
    }

    pub fn lines(&self) -> &L {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }

    /// Process one key
    ///
    /// On error the panel stops where the failing command left it; there
    /// is no rollback.
    pub fn handle_key(&mut self, key: KeyCode) -> Result<Flow, PanelError> {
        match key {
            KeyCode::Quit => Ok(Flow::Quit),
            KeyCode::Digit(nibble) => {
                self.feed_digit(nibble)?;
                Ok(Flow::Continue)
            }
            _ => {
                let ctx = TransitionContext {
                    write_protect: self.write_protect,
                    switches: self.switches,
                    entry_address: self.entry.address(),
                };
                let t = transition(self.mode, key, &ctx, &self.policy);
                self.apply(t)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn feed_digit(&mut self, nibble: u8) -> Result<(), PanelError> {
        match self.entry.feed(nibble) {
            Entry::Byte(byte) => self.execute(Command::DriveSwitches(byte))?,
            Entry::Pending | Entry::Address(_) => {}
        }
        Ok(())
    }

    fn apply(&mut self, t: Transition) -> Result<(), PanelError> {
        if t.next != self.mode {
            if t.next == Mode::Address {
                self.entry.begin_address(self.counter.addr());
            } else {
                self.entry.abandon();
            }
        }
        self.mode = t.next;
        self.write_protect = t.write_protect;

        for command in t.commands {
            self.execute(command)?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<(), PanelError> {
        match command {
            Command::Advance => self.counter.advance(&mut self.lines)?,
            Command::SampleData => self.data = self.lines.read_bus()?,
            Command::ResetAddress => self.counter.reset_to_zero(&mut self.lines)?,
            Command::SeekAddress(target) => self.counter.seek(&mut self.lines, target)?,
            Command::DriveWrite(enabled) => self.lines.drive_line(Line::Write, enabled)?,
            Command::DriveWait(asserted) => self.lines.drive_line(Line::Wait, asserted)?,
            Command::DriveClear(asserted) => self.lines.drive_line(Line::Clear, asserted)?,
            Command::DriveSwitches(byte) => {
                self.lines.write_bus(byte)?;
                self.switches = byte;
            }
        }
        Ok(())
    }

    /// State as seen by the presenter
    pub fn view(&self) -> PanelView {
        PanelView {
            mode: self.mode,
            addr: self.counter.addr(),
            entry_address: self.entry.address(),
            entry_pending: self.entry.is_pending(),
            data: self.data,
            switches: self.switches,
            write_protect: self.write_protect,
        }
    }

    /// Idle tick: sample the target's output port and redraw
    ///
    /// Never touches the address counter or the write line. A display
    /// failure is returned as [`PanelError::Display`] after the in-memory
    /// state is already up to date.
    pub fn refresh<D: HexDisplay>(&mut self, display: &mut D) -> Result<(), PanelError> {
        self.data = self.lines.read_bus()?;
        let frame = present(&self.view());
        render_frame(&frame, display)?;
        Ok(())
    }

    /// One iteration of the polling loop
    ///
    /// Waits up to `timeout_us` for a key, handles it, then refreshes the
    /// display. `Quit` returns before the refresh.
    pub fn step<K: KeySource, D: HexDisplay>(
        &mut self,
        keys: &mut K,
        display: &mut D,
        timeout_us: u32,
    ) -> Result<Flow, PanelError> {
        if let Some(key) = keys.poll(timeout_us) {
            if self.handle_key(key)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
        self.refresh(display)?;
        Ok(Flow::Continue)
    }

    /// Copy `bytes` into target memory from `start` on
    ///
    /// Resets the target into load mode and counts up to `start` with
    /// WRITE released, then drives each byte onto the switches and issues
    /// one IN pulse with WRITE asserted. Writing stops at the top of
    /// memory. The panel ends in Load mode, read-only, with the shadow
    /// address just past the last byte written. Returns the byte count.
    pub fn load_image(&mut self, start: u16, bytes: &[u8]) -> Result<usize, PanelError> {
        let count = bytes.len().min(room_above(start));
        self.enter_load_read_only()?;
        self.counter.seek(&mut self.lines, start)?;

        self.lines.assert_line(Line::Write)?;
        for byte in &bytes[..count] {
            self.execute(Command::DriveSwitches(*byte))?;
            self.counter.advance(&mut self.lines)?;
        }
        self.lines.release_line(Line::Write)?;
        self.data = self.lines.read_bus()?;
        Ok(count)
    }

    /// Read target memory from `start` into `out`
    ///
    /// Counts up to `start` read-only, then pulses IN once per byte and
    /// samples the output port after each pulse. Stops at the top of
    /// memory. Returns the byte count; the panel ends in Load mode,
    /// read-only.
    pub fn dump(&mut self, start: u16, out: &mut [u8]) -> Result<usize, PanelError> {
        let count = out.len().min(room_above(start));
        self.enter_load_read_only()?;
        self.counter.seek(&mut self.lines, start)?;

        for slot in &mut out[..count] {
            self.counter.advance(&mut self.lines)?;
            self.data = self.lines.read_bus()?;
            *slot = self.data;
        }
        Ok(count)
    }

    fn enter_load_read_only(&mut self) -> Result<(), PanelError> {
        self.entry.abandon();
        self.mode = Mode::Load;
        self.write_protect = true;
        self.lines.release_line(Line::Write)?;
        Ok(())
    }

    /// Read every front panel signal, for diagnostics
    pub fn status(&mut self) -> Result<TargetStatus, PanelError> {
        Ok(TargetStatus {
            leds: self.lines.read_bus()?,
            q: self.lines.read_signal(Signal::Q)? == Level::High,
            ef3: self.lines.read_signal(Signal::Ef3)? == Level::High,
            switches: self.lines.read_switch_bus()?,
            writing: self.lines.is_asserted(Line::Write)?,
            waiting: self.lines.is_asserted(Line::Wait)?,
            clearing: self.lines.is_asserted(Line::Clear)?,
            in_active: self.lines.is_asserted(Line::In)?,
        })
    }
}

/// Bytes from `start` to the top of the 64 KiB address space
fn room_above(start: u16) -> usize {
    0x1_0000 - usize::from(start)
}
