//! Front panel connector drivers

pub mod gpio;

pub use gpio::{ControlPins, GpioLines, SignalPins};
