//! Panel error taxonomy
//!
//! Line and start-up errors are fatal: once a pulse sequence may have
//! been cut short the shadow address can no longer be trusted. Display
//! errors are the only recoverable class.

use crate::traits::{DisplayError, Line, LineError};

/// Start-up failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// A released control line reads low; a switch on the target is
    /// pulling it to ground
    LineStuck(Line),
    /// Switch bus bits that read low after driving 0xFF
    BusStuck(u8),
    /// A driver could not be brought up
    Driver(LineError),
}

/// Errors surfaced by the front panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Hardware could not be initialised
    Init(InitError),
    /// A line or bus operation failed mid-sequence
    Line(LineError),
    /// Rendering failed
    Display(DisplayError),
}

impl PanelError {
    /// Check if the control loop must stop
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PanelError::Display(_))
    }
}

impl From<InitError> for PanelError {
    fn from(e: InitError) -> Self {
        PanelError::Init(e)
    }
}

impl From<LineError> for PanelError {
    fn from(e: LineError) -> Self {
        PanelError::Line(e)
    }
}

impl From<DisplayError> for PanelError {
    fn from(e: DisplayError) -> Self {
        PanelError::Display(e)
    }
}
