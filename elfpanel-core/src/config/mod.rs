//! Configuration types and parsing
//!
//! Board-agnostic panel settings, read from the TOML text embedded in
//! the firmware.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
