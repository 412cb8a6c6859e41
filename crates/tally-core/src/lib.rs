#![forbid(unsafe_code)]

//! Bounded counter core for Tally.
//!
//! # Role in Tally
//! `tally-core` owns the only stateful logic in the workspace: an integer
//! confined to inclusive bounds, the presentation derived from it, and the
//! decision of when to celebrate. It does not depend on rendering, input,
//! or localization, so the whole state machine is testable headless.
//!
//! # How it fits in the system
//! The `tally` app wraps a [`BoundedCounter`] in its runtime model, maps
//! button activations to [`BoundedCounter::adjust`], and reads
//! [`Presentation`] when drawing. [`CelebrationLatch`] decides when the
//! confetti effect in `tally-widgets` should pop.

pub mod celebration;
pub mod config;
pub mod counter;
pub mod error;
mod hooks;
pub mod presentation;

pub use celebration::{Celebration, CelebrationLatch, LazyCelebration};
pub use config::CounterConfig;
pub use counter::{BoundedCounter, CounterState, Transition};
pub use error::{CounterError, Result};
pub use hooks::HookGuard;
pub use presentation::{Boundary, Presentation, Thresholds, Tone};
