#![forbid(unsafe_code)]

//! Render kernel: geometry, packed colors, styles, cells, buffers, and frames.
//!
//! Widgets draw into a [`Frame`]; the runtime diffs nothing and simply
//! presents the whole [`Buffer`] each pass, which is plenty for a
//! handful of rows.

pub mod buffer;
pub mod cell;
pub mod color;
pub mod frame;
pub mod geometry;
pub mod interactive;
pub mod style;

pub use buffer::Buffer;
pub use cell::{Cell, CellContent};
pub use color::PackedRgba;
pub use frame::{Frame, HitId};
pub use geometry::Rect;
pub use interactive::{InteractionState, InteractiveStyle};
pub use style::{Style, StyleFlags};
