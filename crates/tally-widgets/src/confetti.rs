#![forbid(unsafe_code)]

//! Confetti burst.
//!
//! Setting the `popped` flag (through [`Celebration::trigger`]) spawns a
//! burst of particles from the middle of the area. [`ConfettiFx::tick`]
//! moves them under gravity; once the animation runs its course the effect
//! clears `popped` itself, so the next trigger starts a fresh burst.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tally_core::Celebration;
use tally_render::{Cell, Frame, PackedRgba, Rect};
use web_time::Duration;

use crate::Widget;

const GLYPHS: &[char] = &['*', '+', 'o', '•', '✦', '·'];

const PALETTE: &[PackedRgba] = &[
    PackedRgba::rgb(255, 87, 87),
    PackedRgba::rgb(255, 189, 46),
    PackedRgba::rgb(87, 214, 111),
    PackedRgba::rgb(84, 160, 255),
    PackedRgba::rgb(200, 110, 255),
    PackedRgba::rgb(255, 255, 255),
];

/// Downward acceleration in area-heights per second squared.
const GRAVITY: f32 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Particle {
    /// Position as a fraction of the area, `0.0..=1.0` while visible.
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    glyph: char,
    color: PackedRgba,
}

/// Particle burst fired on celebration.
#[derive(Debug, Clone)]
pub struct ConfettiFx {
    rng: SmallRng,
    particles: Vec<Particle>,
    popped: bool,
    elapsed: Duration,
    duration: Duration,
    density: usize,
    bursts: u64,
}

impl ConfettiFx {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(1600);
    pub const DEFAULT_DENSITY: usize = 48;

    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_os_rng())
    }

    /// Deterministic particles, for tests and replays.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            particles: Vec::new(),
            popped: false,
            elapsed: Duration::ZERO,
            duration: Self::DEFAULT_DURATION,
            density: Self::DEFAULT_DENSITY,
            bursts: 0,
        }
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn density(mut self, density: usize) -> Self {
        self.density = density;
        self
    }

    /// Whether an animation is running.
    #[must_use]
    pub fn is_popped(&self) -> bool {
        self.popped
    }

    /// Number of bursts started so far.
    #[must_use]
    pub fn bursts(&self) -> u64 {
        self.bursts
    }

    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Start a burst. Popping while already popped restarts the animation.
    pub fn pop(&mut self) {
        self.particles.clear();
        for _ in 0..self.density {
            let particle = Particle {
                x: 0.5,
                y: 0.4,
                vx: self.rng.random_range(-0.7..0.7),
                vy: self.rng.random_range(-1.1..-0.3),
                glyph: GLYPHS[self.rng.random_range(0..GLYPHS.len())],
                color: PALETTE[self.rng.random_range(0..PALETTE.len())],
            };
            self.particles.push(particle);
        }
        self.popped = true;
        self.elapsed = Duration::ZERO;
        self.bursts += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(burst = self.bursts, particles = self.density, "confetti popped");
    }

    /// Advance the animation by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if !self.popped {
            return;
        }
        let secs = dt.as_secs_f32();
        for p in &mut self.particles {
            p.x += p.vx * secs;
            p.y += p.vy * secs;
            p.vy += GRAVITY * secs;
        }
        self.particles
            .retain(|p| (0.0..=1.0).contains(&p.x) && p.y <= 1.0);
        self.elapsed += dt;
        if self.elapsed >= self.duration || self.particles.is_empty() {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.popped = false;
        self.particles.clear();
        self.elapsed = Duration::ZERO;
        #[cfg(feature = "tracing")]
        tracing::trace!(burst = self.bursts, "confetti finished");
    }
}

impl Default for ConfettiFx {
    fn default() -> Self {
        Self::new()
    }
}

impl Celebration for ConfettiFx {
    fn trigger(&mut self) {
        self.pop();
    }
}

impl Widget for ConfettiFx {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if !self.popped || area.is_empty() {
            return;
        }
        let w = f32::from(area.width);
        let h = f32::from(area.height);
        for p in &self.particles {
            if p.y < 0.0 {
                continue;
            }
            let x = area.x + ((p.x * w) as u16).min(area.width - 1);
            let y = area.y + ((p.y * h) as u16).min(area.height - 1);
            if let Some(cell) = frame.buffer.get_mut(x, y) {
                let bg = cell.bg;
                *cell = Cell::from_char(p.glyph);
                cell.fg = p.color;
                cell.bg = bg;
            }
        }
    }
}
