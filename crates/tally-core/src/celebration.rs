#![forbid(unsafe_code)]

//! One-shot celebration signalling.
//!
//! The counter does not animate anything itself. It decides *when* to
//! celebrate ([`CelebrationLatch`]) and hands the actual effect to a
//! [`Celebration`] collaborator, optionally constructed on first use
//! ([`LazyCelebration`]).

use tracing::{debug, info};

use crate::counter::Transition;

/// The capability the counter needs from a visual effect: fire it now.
pub trait Celebration {
    fn trigger(&mut self);
}

/// Edge detector for entries into the celebration value.
///
/// Fires once per transition *into* the target. Staying on the target
/// (for example across re-renders) never fires; leaving and coming back
/// fires again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelebrationLatch {
    target: i64,
    fired: u64,
}

impl CelebrationLatch {
    #[must_use]
    pub const fn new(target: i64) -> Self {
        Self { target, fired: 0 }
    }

    #[must_use]
    pub const fn target(&self) -> i64 {
        self.target
    }

    /// How many times the latch has fired.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    /// Inspect a committed transition; true when the celebration should fire.
    pub fn observe(&mut self, transition: &Transition) -> bool {
        if !transition.entered(self.target) {
            return false;
        }
        self.fired += 1;
        info!(
            value = self.target,
            count = self.fired,
            "celebration threshold entered"
        );
        true
    }
}

type Factory<C> = Box<dyn FnOnce() -> C>;

/// A celebration effect built on first trigger.
pub struct LazyCelebration<C> {
    effect: Option<C>,
    factory: Option<Factory<C>>,
}

impl<C> LazyCelebration<C> {
    pub fn new(factory: impl FnOnce() -> C + 'static) -> Self {
        Self {
            effect: None,
            factory: Some(Box::new(factory)),
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.effect.is_some()
    }

    /// The effect, if it has been loaded.
    #[must_use]
    pub fn get(&self) -> Option<&C> {
        self.effect.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut C> {
        self.effect.as_mut()
    }

    /// Load the effect if needed and return it.
    pub fn load(&mut self) -> Option<&mut C> {
        if self.effect.is_none() {
            if let Some(factory) = self.factory.take() {
                debug!("loading celebration effect");
                self.effect = Some(factory());
            }
        }
        self.effect.as_mut()
    }
}

impl<C: Celebration> Celebration for LazyCelebration<C> {
    fn trigger(&mut self) {
        if let Some(effect) = self.load() {
            effect.trigger();
        }
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for LazyCelebration<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyCelebration")
            .field("effect", &self.effect)
            .field("pending", &self.factory.is_some())
            .finish()
    }
}
