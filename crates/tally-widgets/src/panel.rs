#![forbid(unsafe_code)]

//! Rounded, filled panel.

use tally_render::{Cell, Frame, Rect, Style};

use crate::{Widget, draw_centered};

const TOP_LEFT: char = '╭';
const TOP_RIGHT: char = '╮';
const BOTTOM_LEFT: char = '╰';
const BOTTOM_RIGHT: char = '╯';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// A bordered box with a filled background and an optional title.
#[derive(Debug, Clone, Copy, Default)]
pub struct Panel<'a> {
    style: Style,
    border_style: Style,
    title: Option<&'a str>,
}

impl<'a> Panel<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Area inside the border.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        area.inner(1)
    }
}

impl Widget for Panel<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let area = area.intersection(&frame.bounds());
        if area.width < 2 || area.height < 2 {
            return;
        }
        frame.buffer.set_style(area, self.style);

        let border = self.style.patch(&self.border_style);
        let mut put = |x: u16, y: u16, ch: char| {
            let mut cell = Cell::from_char(ch);
            cell.apply_style(border);
            frame.buffer.set(x, y, cell);
        };
        let (left, top) = (area.left(), area.top());
        let (right, bottom) = (area.right() - 1, area.bottom() - 1);
        for x in left + 1..right {
            put(x, top, HORIZONTAL);
            put(x, bottom, HORIZONTAL);
        }
        for y in top + 1..bottom {
            put(left, y, VERTICAL);
            put(right, y, VERTICAL);
        }
        put(left, top, TOP_LEFT);
        put(right, top, TOP_RIGHT);
        put(left, bottom, BOTTOM_LEFT);
        put(right, bottom, BOTTOM_RIGHT);

        if let Some(title) = self.title {
            let row = Rect::new(left + 1, top, area.width.saturating_sub(2), 1);
            draw_centered(frame, row, title, border);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_render::PackedRgba;

    #[test]
    fn draws_rounded_border() {
        let mut frame = Frame::new(6, 3);
        Panel::new().render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "╭────╮");
        assert_eq!(frame.buffer.row_text(1), "│    │");
        assert_eq!(frame.buffer.row_text(2), "╰────╯");
    }

    #[test]
    fn fills_background() {
        let mut frame = Frame::new(4, 3);
        Panel::new()
            .style(Style::new().bg(PackedRgba::LIGHT_BLUE))
            .render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.get(1, 1).unwrap().bg, PackedRgba::LIGHT_BLUE);
    }

    #[test]
    fn title_sits_on_top_border() {
        let mut frame = Frame::new(10, 3);
        Panel::new().title("ab").render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "╭───ab───╮");
    }

    #[test]
    fn too_small_area_draws_nothing() {
        let mut frame = Frame::new(4, 4);
        Panel::new().render(Rect::new(0, 0, 1, 4), &mut frame);
        assert!(frame.buffer.get(0, 0).unwrap().is_empty());
    }
}
