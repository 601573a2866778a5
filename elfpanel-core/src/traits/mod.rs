//! Hardware abstraction traits
//!
//! These traits define the interface between the front panel logic
//! and the hardware-specific drivers.

pub mod display;
pub mod keys;
pub mod line;

pub use display::{DisplayError, HexDisplay, DISPLAY_POSITIONS};
pub use keys::{KeyCode, KeySource, UnknownKey};
pub use line::{Level, Line, LineDriver, LineDriverExt, LineError, Signal};
