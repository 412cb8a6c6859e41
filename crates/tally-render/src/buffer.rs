#![forbid(unsafe_code)]

//! Row-major grid of cells.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`.
//! 2. Writes outside the grid are dropped, never panics.
//! 3. A wide grapheme occupies its cell plus a `Continuation` cell; it is
//!    not written at all when its second half would fall past the clip edge.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::{Cell, CellContent};
use crate::geometry::Rect;
use crate::style::Style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Reset every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Apply `style` to every cell in `area` without touching content.
    pub fn set_style(&mut self, area: Rect, style: Style) {
        let area = area.intersection(&self.area());
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.apply_style(style);
                }
            }
        }
    }

    /// Draw `text` starting at `(x, y)`, stopping before column `max_x`.
    ///
    /// Returns the column after the last cell written.
    pub fn draw_str(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        if y >= self.height {
            return x;
        }
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let w = grapheme.width();
            if w == 0 {
                continue;
            }
            let w = w.min(2) as u16;
            if col.saturating_add(w) > max_x {
                break;
            }
            if let Some(cell) = self.get_mut(col, y) {
                cell.content = CellContent::from_grapheme(grapheme);
                cell.apply_style(style);
            }
            if w == 2 {
                if let Some(cell) = self.get_mut(col + 1, y) {
                    cell.content = CellContent::Continuation;
                    cell.apply_style(style);
                }
            }
            col += w;
        }
        col
    }

    /// Text of row `y` with trailing blanks trimmed. Useful in tests.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        if y < self.height {
            for x in 0..self.width {
                if let Some(cell) = self.get(x, y) {
                    cell.content.push_to(&mut out);
                }
            }
        }
        out.trim_end().to_string()
    }

    /// All rows as text.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }

    /// Iterate `(x, y, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i % width) as u16, (i / width) as u16, cell))
    }
}
