#![forbid(unsafe_code)]

//! Bounded counter state and its single mutation path.
//!
//! # Invariants
//!
//! 1. `min <= value <= max` after construction and after every `adjust`.
//! 2. An adjustment whose result would leave the bounds (or overflow `i64`)
//!    commits nothing and runs no hooks.
//! 3. `version` increments by exactly 1 per committed change.
//! 4. Hooks observe the committed state: by the time a hook runs, the counter
//!    already holds `transition.new`.

use tracing::{debug, trace};

use crate::error::{CounterError, Result};
use crate::hooks::{ChangeHooks, HookGuard};

/// Snapshot of the counter: current value plus inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CounterState {
    value: i64,
    min: i64,
    max: i64,
}

impl CounterState {
    /// Default starting value.
    pub const DEFAULT_VALUE: i64 = 1;
    /// Default inclusive lower bound.
    pub const DEFAULT_MIN: i64 = 0;
    /// Default inclusive upper bound.
    pub const DEFAULT_MAX: i64 = 99;

    /// Build a state, rejecting inverted bounds or an out-of-range value.
    pub fn new(value: i64, min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(CounterError::InvertedBounds { min, max });
        }
        if value < min || value > max {
            return Err(CounterError::ValueOutOfBounds { value, min, max });
        }
        Ok(Self { value, min, max })
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    #[inline]
    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Whether `candidate` lies within `min..=max`.
    #[inline]
    #[must_use]
    pub const fn contains(&self, candidate: i64) -> bool {
        candidate >= self.min && candidate <= self.max
    }

    #[inline]
    #[must_use]
    pub const fn at_min(&self) -> bool {
        self.value == self.min
    }

    #[inline]
    #[must_use]
    pub const fn at_max(&self) -> bool {
        self.value == self.max
    }

    /// The value `delta` steps away, if it stays inside the bounds.
    #[must_use]
    pub fn step(&self, delta: i64) -> Option<i64> {
        self.value
            .checked_add(delta)
            .filter(|&candidate| self.contains(candidate))
    }
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            value: Self::DEFAULT_VALUE,
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// One committed change: the state before and after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub old: CounterState,
    pub new: CounterState,
}

impl Transition {
    /// Signed change in value.
    #[must_use]
    pub const fn delta(&self) -> i64 {
        self.new.value - self.old.value
    }

    /// True when this change moved the value onto `target` from elsewhere.
    #[must_use]
    pub const fn entered(&self, target: i64) -> bool {
        self.new.value == target && self.old.value != target
    }

    /// True when this change moved the value off `target`.
    #[must_use]
    pub const fn left(&self, target: i64) -> bool {
        self.old.value == target && self.new.value != target
    }
}

/// A counter confined to inclusive bounds.
///
/// The only mutation is [`adjust`](Self::adjust); out-of-range requests are
/// ignored rather than clamped, so the value never visibly overshoots.
pub struct BoundedCounter {
    state: CounterState,
    hooks: ChangeHooks,
    version: u64,
}

impl std::fmt::Debug for BoundedCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCounter")
            .field("state", &self.state)
            .field("version", &self.version)
            .field("hook_count", &self.hooks.len())
            .finish()
    }
}

impl Default for BoundedCounter {
    fn default() -> Self {
        Self::from_state(CounterState::default())
    }
}

impl BoundedCounter {
    /// Build a counter from a value and bounds.
    pub fn new(value: i64, min: i64, max: i64) -> Result<Self> {
        CounterState::new(value, min, max).map(Self::from_state)
    }

    /// Wrap an already-validated state.
    #[must_use]
    pub fn from_state(state: CounterState) -> Self {
        Self {
            state,
            hooks: ChangeHooks::new(),
            version: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> CounterState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> i64 {
        self.state.value
    }

    /// Number of committed changes since construction.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Move the value by `delta` if the result stays inside the bounds.
    ///
    /// Returns the committed transition, or `None` when the request was out
    /// of range or `delta` was zero. Hooks run synchronously before this
    /// returns, and only for committed changes.
    pub fn adjust(&mut self, delta: i64) -> Option<Transition> {
        let Some(candidate) = self.state.step(delta) else {
            trace!(
                value = self.state.value,
                delta,
                min = self.state.min,
                max = self.state.max,
                "adjust ignored: out of bounds"
            );
            return None;
        };
        if candidate == self.state.value {
            return None;
        }

        let old = self.state;
        self.state.value = candidate;
        self.version += 1;
        let transition = Transition {
            old,
            new: self.state,
        };
        debug!(
            old = old.value,
            new = candidate,
            version = self.version,
            "counter committed"
        );
        self.hooks.run(&transition);
        Some(transition)
    }

    /// `adjust(1)`.
    pub fn increment(&mut self) -> Option<Transition> {
        self.adjust(1)
    }

    /// `adjust(-1)`.
    pub fn decrement(&mut self) -> Option<Transition> {
        self.adjust(-1)
    }

    /// Register a post-mutation hook. Dropping the guard unregisters it.
    pub fn on_change(&mut self, hook: impl Fn(&Transition) + 'static) -> HookGuard {
        self.hooks.subscribe(hook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn default_state_matches_constructor_defaults() {
        let state = CounterState::default();
        assert_eq!(state.value(), 1);
        assert_eq!(state.min(), 0);
        assert_eq!(state.max(), 99);
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        assert!(matches!(
            CounterState::new(0, 5, 1),
            Err(CounterError::InvertedBounds { min: 5, max: 1 })
        ));
    }

    #[test]
    fn new_rejects_value_outside_bounds() {
        assert!(matches!(
            CounterState::new(100, 0, 99),
            Err(CounterError::ValueOutOfBounds { value: 100, .. })
        ));
        assert!(CounterState::new(-1, 0, 99).is_err());
    }

    #[test]
    fn new_accepts_degenerate_range() {
        let state = CounterState::new(7, 7, 7).unwrap();
        assert!(state.at_min());
        assert!(state.at_max());
    }

    #[test]
    fn increment_commits_inside_bounds() {
        let mut counter = BoundedCounter::default();
        let t = counter.increment().unwrap();
        assert_eq!(t.old.value(), 1);
        assert_eq!(t.new.value(), 2);
        assert_eq!(t.delta(), 1);
        assert_eq!(counter.value(), 2);
        assert_eq!(counter.version(), 1);
    }

    #[test]
    fn increment_at_max_is_noop() {
        let mut counter = BoundedCounter::new(99, 0, 99).unwrap();
        assert!(counter.increment().is_none());
        assert_eq!(counter.value(), 99);
        assert_eq!(counter.version(), 0);
    }

    #[test]
    fn decrement_at_min_is_noop() {
        let mut counter = BoundedCounter::new(0, 0, 99).unwrap();
        assert!(counter.decrement().is_none());
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn large_delta_past_bound_is_rejected_not_clamped() {
        let mut counter = BoundedCounter::new(95, 0, 99).unwrap();
        assert!(counter.adjust(10).is_none());
        assert_eq!(counter.value(), 95);
        assert!(counter.adjust(4).is_some());
        assert_eq!(counter.value(), 99);
    }

    #[test]
    fn zero_delta_commits_nothing() {
        let mut counter = BoundedCounter::default();
        assert!(counter.adjust(0).is_none());
        assert_eq!(counter.version(), 0);
    }

    #[test]
    fn overflow_is_treated_as_out_of_bounds() {
        let mut counter = BoundedCounter::new(i64::MAX, 0, i64::MAX).unwrap();
        assert!(counter.adjust(1).is_none());
        assert_eq!(counter.value(), i64::MAX);

        let mut counter = BoundedCounter::new(i64::MIN, i64::MIN, 0).unwrap();
        assert!(counter.adjust(-1).is_none());
        assert_eq!(counter.value(), i64::MIN);
    }

    #[test]
    fn nineteen_decrements_stop_at_min() {
        let mut counter = BoundedCounter::default();
        for _ in 0..19 {
            counter.adjust(-1);
        }
        assert_eq!(counter.value(), 0);
        assert!(counter.state().at_min());
    }

    #[test]
    fn transition_entered_and_left() {
        let old = CounterState::new(20, 0, 99).unwrap();
        let new = CounterState::new(21, 0, 99).unwrap();
        let t = Transition { old, new };
        assert!(t.entered(21));
        assert!(!t.entered(20));
        assert!(t.left(20));
        assert!(!t.left(21));
    }

    #[test]
    fn hooks_see_committed_state() {
        let mut counter = BoundedCounter::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _guard =
            counter.on_change(move |t| sink.borrow_mut().push((t.old.value(), t.new.value())));

        counter.increment();
        counter.decrement();
        counter.adjust(1000);

        assert_eq!(*seen.borrow(), vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn dropped_hook_stops_running() {
        let mut counter = BoundedCounter::default();
        let hits = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&hits);
        let guard = counter.on_change(move |_| *sink.borrow_mut() += 1);

        counter.increment();
        drop(guard);
        counter.increment();

        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn debug_format_reports_hooks() {
        let mut counter = BoundedCounter::default();
        let _guard = counter.on_change(|_| {});
        let dbg = format!("{counter:?}");
        assert!(dbg.contains("BoundedCounter"));
        assert!(dbg.contains("hook_count: 1"));
    }
}
