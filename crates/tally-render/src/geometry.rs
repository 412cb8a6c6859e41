#![forbid(unsafe_code)]

//! Rectangles in cell coordinates.

/// An axis-aligned rectangle. `x`/`y` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin.
    #[must_use]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    #[must_use]
    pub const fn left(&self) -> u16 {
        self.x
    }

    #[inline]
    #[must_use]
    pub const fn top(&self) -> u16 {
        self.y
    }

    /// One past the last column.
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the last row.
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `margin` cells on every side.
    #[must_use]
    pub const fn inner(&self, margin: u16) -> Self {
        let shrink = margin.saturating_mul(2);
        if self.width < shrink || self.height < shrink {
            return Self::new(self.x, self.y, 0, 0);
        }
        Self::new(
            self.x + margin,
            self.y + margin,
            self.width - shrink,
            self.height - shrink,
        )
    }

    /// The overlapping region, or an empty rect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Self::new(x, y, 0, 0);
        }
        Self::new(x, y, right - x, bottom - y)
    }

    /// A `width` x `height` rect centered inside `self`, clipped to it.
    #[must_use]
    pub fn centered(&self, width: u16, height: u16) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Self::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }

    /// The single row at `offset` from the top, if inside.
    #[must_use]
    pub fn row(&self, offset: u16) -> Option<Self> {
        (offset < self.height).then(|| Self::new(self.x, self.y + offset, self.width, 1))
    }
}
