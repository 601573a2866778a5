//! Board-agnostic core logic for the Elf front panel firmware
//!
//! This crate contains all panel logic that does not depend on specific
//! hardware implementations:
//!
//! - Hardware abstraction traits (control lines, hex display, keys)
//! - Address shadow counter and hex entry buffer
//! - Mode state machine
//! - Display presenter
//! - Configuration type definitions and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod panel;
pub mod traits;

#[cfg(test)]
mod testing;
