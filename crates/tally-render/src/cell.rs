#![forbid(unsafe_code)]

//! A single terminal cell.

use crate::color::PackedRgba;
use crate::style::{Style, StyleFlags};

/// What a cell displays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CellContent {
    #[default]
    Empty,
    Char(char),
    /// A multi-codepoint grapheme cluster (combining marks, conjuncts).
    Cluster(Box<str>),
    /// Right half of a wide grapheme that starts in the cell to the left.
    Continuation,
}

impl CellContent {
    #[must_use]
    pub fn from_char(ch: char) -> Self {
        Self::Char(ch)
    }

    /// Build content from one grapheme cluster.
    #[must_use]
    pub fn from_grapheme(g: &str) -> Self {
        let mut chars = g.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Self::Empty,
            (Some(c), None) => Self::Char(c),
            _ => Self::Cluster(g.into()),
        }
    }

    /// The character, when the content is exactly one char.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Text to emit for this cell; continuations emit nothing.
    pub fn push_to(&self, out: &mut String) {
        match self {
            Self::Empty => out.push(' '),
            Self::Char(c) => out.push(*c),
            Self::Cluster(s) => out.push_str(s),
            Self::Continuation => {}
        }
    }
}

/// Content plus colors and attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub content: CellContent,
    pub fg: PackedRgba,
    pub bg: PackedRgba,
    pub attrs: StyleFlags,
}

impl Cell {
    #[must_use]
    pub fn from_char(ch: char) -> Self {
        Self {
            content: CellContent::Char(ch),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// Apply the set fields of `style`.
    pub fn apply_style(&mut self, style: Style) {
        if let Some(fg) = style.fg {
            self.fg = fg;
        }
        if let Some(bg) = style.bg {
            self.bg = bg;
        }
        if let Some(attrs) = style.attrs {
            self.attrs = attrs;
        }
    }
}
