#![forbid(unsafe_code)]

//! Writes a [`Buffer`] to the terminal.
//!
//! Every pass repaints the whole buffer: the UI is a handful of rows, so a
//! diff would save nothing noticeable. Style changes are emitted only when
//! they differ from the previous cell.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use tally_render::{Buffer, Cell, CellContent, PackedRgba, StyleFlags};

fn color(c: PackedRgba) -> Color {
    if c.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

const ATTRIBUTES: &[(StyleFlags, Attribute)] = &[
    (StyleFlags::BOLD, Attribute::Bold),
    (StyleFlags::DIM, Attribute::Dim),
    (StyleFlags::ITALIC, Attribute::Italic),
    (StyleFlags::UNDERLINE, Attribute::Underlined),
    (StyleFlags::BLINK, Attribute::SlowBlink),
    (StyleFlags::REVERSE, Attribute::Reverse),
];

#[derive(Debug)]
pub struct Presenter<W: Write> {
    writer: W,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Scroll the terminal so `rows` lines are free at the bottom.
    pub fn reserve_rows(&mut self, rows: u16) -> io::Result<()> {
        for _ in 0..rows {
            queue!(self.writer, Print("\r\n"))?;
        }
        self.writer.flush()
    }

    /// Paint `buffer` with its top row at terminal row `origin_y`.
    pub fn present(&mut self, buffer: &Buffer, origin_y: u16) -> io::Result<()> {
        let _span = tracing::trace_span!(
            "present",
            width = buffer.width(),
            height = buffer.height(),
            origin_y
        )
        .entered();

        let mut text = String::new();
        for y in 0..buffer.height() {
            queue!(
                self.writer,
                MoveTo(0, origin_y.saturating_add(y)),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
            let mut prev: Option<&Cell> = None;
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                if cell.content == CellContent::Continuation {
                    continue;
                }
                let restyle = prev.is_none_or(|p| {
                    p.fg != cell.fg || p.bg != cell.bg || p.attrs != cell.attrs
                });
                if restyle {
                    self.apply_style(cell)?;
                }
                text.clear();
                cell.content.push_to(&mut text);
                queue!(self.writer, Print(&text))?;
                prev = Some(cell);
            }
        }
        queue!(self.writer, SetAttribute(Attribute::Reset), ResetColor)?;
        self.writer.flush()
    }

    fn apply_style(&mut self, cell: &Cell) -> io::Result<()> {
        queue!(
            self.writer,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(color(cell.fg)),
            SetBackgroundColor(color(cell.bg))
        )?;
        for (flag, attribute) in ATTRIBUTES {
            if cell.attrs.contains(*flag) {
                queue!(self.writer, SetAttribute(*attribute))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_render::Style;

    fn present(buffer: &Buffer) -> String {
        let mut presenter = Presenter::new(Vec::new());
        presenter.present(buffer, 0).unwrap();
        String::from_utf8(presenter.writer().clone()).unwrap()
    }

    #[test]
    fn writes_cell_text() {
        let mut buffer = Buffer::new(5, 1);
        buffer.draw_str(0, 0, "hi", Style::new(), 5);
        assert!(present(&buffer).contains("hi"));
    }

    #[test]
    fn emits_truecolor_for_styled_cells() {
        let mut buffer = Buffer::new(3, 1);
        buffer.draw_str(0, 0, "x", Style::new().fg(PackedRgba::rgb(1, 2, 3)), 3);
        assert!(present(&buffer).contains("\x1b[38;2;1;2;3m"));
    }

    #[test]
    fn skips_continuation_cells() {
        let mut buffer = Buffer::new(4, 1);
        buffer.draw_str(0, 0, "计", Style::new(), 4);
        let out = present(&buffer);
        assert_eq!(out.matches('计').count(), 1);
    }

    #[test]
    fn reserve_rows_prints_newlines() {
        let mut presenter = Presenter::new(Vec::new());
        presenter.reserve_rows(3).unwrap();
        assert_eq!(presenter.writer().as_slice(), b"\r\n\r\n\r\n");
    }
}
