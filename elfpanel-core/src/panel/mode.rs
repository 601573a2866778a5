//! Panel operating modes

/// Front panel mode; exactly one is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Target held in load mode; IN reads or writes memory and advances
    Load,
    /// Target running
    Run,
    /// Target halted by WAIT
    Wait,
    /// Typing a new address; WRITE suspended
    Address,
    /// Typing switch values for a program; WRITE suspended
    Switch,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Load, Mode::Run, Mode::Wait, Mode::Address, Mode::Switch];

    /// Check if the write line is held inactive regardless of the write-protect flag
    pub fn write_suspended(&self) -> bool {
        matches!(self, Mode::Address | Mode::Switch)
    }
}
