//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in elfpanel-core on top of `embedded-hal` and `embedded-io`:
//!
//! - Control lines and data buses over GPIO pins
//! - Micro Dot pHAT hex display (IS31FL3730 over I2C)
//! - Keymaps and a serial terminal key source

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod keys;
pub mod lines;
