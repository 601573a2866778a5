//! Key sources and keymaps

pub mod keymap;
pub mod serial;

pub use keymap::Keymap;
pub use serial::SerialKeys;
