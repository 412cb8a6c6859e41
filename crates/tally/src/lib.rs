#![forbid(unsafe_code)]

//! The `counter-app` binary's library half: CLI, logging, and the counter
//! model. Kept as a library so the model can be driven headless in tests.

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;

pub use app::{CounterApp, Msg};
pub use cli::{Cli, run, run_from_env};
pub use error::{AppError, Result};
