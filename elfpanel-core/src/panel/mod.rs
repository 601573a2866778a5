//! Front panel logic
//!
//! The address counter, hex entry buffer and mode state machine that turn
//! key presses into line protocol sequences, plus the presenter that maps
//! panel state onto the hex display.

pub mod counter;
pub mod entry;
pub mod error;
pub mod machine;
pub mod mode;
pub mod presenter;

pub use counter::AddressCounter;
pub use entry::{Entry, EntryTarget, HexEntryBuffer, Parity};
pub use error::{InitError, PanelError};
pub use machine::{
    transition, Command, Flow, FrontPanel, TargetStatus, Transition, TransitionContext,
    MAX_COMMANDS,
};
pub use mode::Mode;
pub use presenter::{present, render_frame, DigitPair, DisplayFrame, PanelView};
