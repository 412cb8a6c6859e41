#![forbid(unsafe_code)]

//! Widgets for Tally.
//!
//! A [`Widget`] draws itself into a [`Frame`] at a given area and may
//! register hit regions there. Widgets are cheap value types rebuilt on every
//! `view`; persistent state (the counter, the confetti particles) lives in
//! the model.

pub mod button;
pub mod confetti;
pub mod counter_view;
pub mod panel;

pub use button::{Button, button_style};
pub use confetti::ConfettiFx;
pub use counter_view::{ButtonKind, CounterLabels, CounterView, tone_color};
pub use panel::Panel;

use tally_render::{Frame, Rect, Style};
use unicode_width::UnicodeWidthStr;

/// Something that can draw itself into a frame.
pub trait Widget {
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Draw `text` at `(x, y)`, clipped at `max_x`. Returns the end column.
pub(crate) fn draw_text(
    frame: &mut Frame,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    frame.buffer.draw_str(x, y, text, style, max_x)
}

/// Draw `text` horizontally centered on `row`.
pub fn draw_centered(frame: &mut Frame, row: Rect, text: &str, style: Style) {
    let width = text_width(text).min(row.width);
    let x = row.x + (row.width - width) / 2;
    draw_text(frame, x, row.y, text, style, row.right());
}

/// Display width in cells.
#[must_use]
pub fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}
