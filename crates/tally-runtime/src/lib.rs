#![forbid(unsafe_code)]

//! Elm-style runtime for Tally.
//!
//! [`Model`] and [`Cmd`] define the update loop, [`Program`] drives it on a
//! real terminal through crossterm, and [`ProgramSimulator`] drives it
//! headless for tests.

pub mod event;
pub mod presenter;
pub mod program;
pub mod simulator;
pub mod terminal;

pub use event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use program::{Cmd, Model, Program, ProgramConfig, ScreenMode};
pub use simulator::ProgramSimulator;
