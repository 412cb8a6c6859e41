#![forbid(unsafe_code)]

//! Frame = Buffer + hit regions for one render pass.
//!
//! Views draw into [`Frame::buffer`] and register clickable areas with
//! [`Frame::register_hit`]. The runtime maps mouse positions back to a
//! [`HitId`] with [`Frame::hit_test`]; later registrations shadow earlier
//! ones where they overlap.

use crate::buffer::Buffer;
use crate::geometry::Rect;

/// Identifier for a clickable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: Buffer,
    hits: Vec<(Rect, HitId)>,
}

impl Frame {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hits: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.buffer.area()
    }

    /// Reset cells and hit regions for the next pass.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.hits.clear();
    }

    /// Register `rect` (clipped to the frame) as belonging to `id`.
    ///
    /// Returns false when nothing of `rect` is on screen.
    pub fn register_hit(&mut self, rect: Rect, id: HitId) -> bool {
        let clipped = rect.intersection(&self.bounds());
        if clipped.is_empty() {
            return false;
        }
        self.hits.push((clipped, id));
        true
    }

    /// The topmost region under `(x, y)`.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitId> {
        self.hits
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, id)| *id)
    }

    /// Number of registered regions.
    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }
}
