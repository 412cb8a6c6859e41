#![forbid(unsafe_code)]

//! Cell styles with CSS-like layering.
//!
//! Every field is optional. [`Style::patch`] layers one style over another:
//! fields set on the overlay win, unset fields fall through to the base.

use bitflags::bitflags;

use crate::color::PackedRgba;

bitflags! {
    /// Text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const REVERSE = 1 << 5;
    }
}

/// Foreground, background, and attributes; `None` means inherit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<PackedRgba>,
    pub bg: Option<PackedRgba>,
    pub attrs: Option<StyleFlags>,
}

impl Style {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub fn add(mut self, flags: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_default() | flags);
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.add(StyleFlags::BOLD)
    }

    #[must_use]
    pub fn dim(self) -> Self {
        self.add(StyleFlags::DIM)
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        self.add(StyleFlags::REVERSE)
    }

    /// Layer `overlay` on top of `self`.
    #[must_use]
    pub fn patch(self, overlay: &Self) -> Self {
        Self {
            fg: overlay.fg.or(self.fg),
            bg: overlay.bg.or(self.bg),
            attrs: match (self.attrs, overlay.attrs) {
                (Some(a), Some(b)) => Some(a | b),
                (a, b) => b.or(a),
            },
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_overlay_wins_for_set_fields() {
        let base = Style::new().fg(PackedRgba::WHITE).bg(PackedRgba::BLACK);
        let overlay = Style::new().fg(PackedRgba::RED);
        let merged = base.patch(&overlay);
        assert_eq!(merged.fg, Some(PackedRgba::RED));
        assert_eq!(merged.bg, Some(PackedRgba::BLACK));
    }

    #[test]
    fn patch_unions_attributes() {
        let merged = Style::new().bold().patch(&Style::new().dim());
        let attrs = merged.attrs.unwrap();
        assert!(attrs.contains(StyleFlags::BOLD));
        assert!(attrs.contains(StyleFlags::DIM));
    }

    #[test]
    fn default_is_empty() {
        assert!(Style::default().is_empty());
        assert!(!Style::new().bold().is_empty());
    }
}
