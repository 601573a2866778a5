//! Panel configuration types
//!
//! Timing margins and behaviour policies. Pin assignments are
//! board-specific and live in the firmware.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default IN pulse hold time in microseconds
pub const DEFAULT_PULSE_HOLD_US: u32 = 100;

/// Default settle time after start-up in microseconds
pub const DEFAULT_SETTLE_US: u32 = 1000;

/// Default key poll timeout in milliseconds
pub const DEFAULT_POLL_TIMEOUT_MS: u32 = 50;

/// I2C address of the rightmost display driver
pub const DEFAULT_DISPLAY_ADDRESS: u8 = 0x61;

/// Signal timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TimingConfig {
    /// Hold time of each pulse edge (us)
    pub pulse_hold_us: u32,
    /// Delay between releasing the lines at start-up and the first pulse (us)
    pub settle_us: u32,
    /// How long one loop iteration waits for a key (ms)
    pub poll_timeout_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pulse_hold_us: DEFAULT_PULSE_HOLD_US,
            settle_us: DEFAULT_SETTLE_US,
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
        }
    }
}

/// Behaviour choices that differ between panel variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PolicyConfig {
    /// After an address commit, restore the write line from the
    /// write-protect flag. When false the panel always returns read-only.
    pub restore_write_state_on_address_commit: bool,
    /// Leaving switch monitor pulses IN once so the first byte is shown
    pub prefetch_on_switch_exit: bool,
    /// Address to count up to right after start-up
    pub start_address: u16,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            restore_write_state_on_address_commit: true,
            prefetch_on_switch_exit: false,
            start_address: 0,
        }
    }
}

/// Display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DisplayConfig {
    /// Render frames at all
    pub enabled: bool,
    /// I2C address of position 0; positions 1 and 2 follow
    pub base_address: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_address: DEFAULT_DISPLAY_ADDRESS,
        }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PanelConfig {
    pub timing: TimingConfig,
    pub policy: PolicyConfig,
    pub display: DisplayConfig,
}

impl PanelConfig {
    /// Poll timeout in microseconds, as taken by [`crate::traits::KeySource::poll`]
    pub fn poll_timeout_us(&self) -> u32 {
        self.timing.poll_timeout_ms.saturating_mul(1000)
    }
}
