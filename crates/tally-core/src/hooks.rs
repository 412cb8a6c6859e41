#![forbid(unsafe_code)]

//! Post-mutation hooks for [`BoundedCounter`](crate::BoundedCounter).
//!
//! Hooks are stored as weak references; the caller keeps the strong side in
//! a [`HookGuard`]. Dropping the guard makes the hook unreachable, and the
//! dead entry is pruned on the next run.
//!
//! # Invariants
//!
//! 1. Hooks run in registration order.
//! 2. Hooks run synchronously, once per committed transition.
//! 3. A hook whose guard was dropped never runs again.

use std::rc::{Rc, Weak};

use tracing::trace_span;

use crate::counter::Transition;

type HookRc = Rc<dyn Fn(&Transition)>;
type HookWeak = Weak<dyn Fn(&Transition)>;

/// Registry of change hooks, owned by the counter.
#[derive(Default)]
pub(crate) struct ChangeHooks {
    hooks: Vec<HookWeak>,
}

impl ChangeHooks {
    pub(crate) fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Registered hooks, including dead ones not yet pruned.
    pub(crate) fn len(&self) -> usize {
        self.hooks.len()
    }

    pub(crate) fn subscribe(&mut self, hook: impl Fn(&Transition) + 'static) -> HookGuard {
        let strong: HookRc = Rc::new(hook);
        self.hooks.push(Rc::downgrade(&strong));
        HookGuard { _hook: strong }
    }

    pub(crate) fn run(&mut self, transition: &Transition) {
        self.hooks.retain(|w| w.strong_count() > 0);
        if self.hooks.is_empty() {
            return;
        }

        let live: Vec<HookRc> = self.hooks.iter().filter_map(Weak::upgrade).collect();
        let _span = trace_span!(
            "counter.hooks",
            hooks = live.len(),
            old = transition.old.value(),
            new = transition.new.value()
        )
        .entered();
        for hook in &live {
            hook(transition);
        }
    }
}

/// Keeps a hook registered. Dropping it unsubscribes the hook.
pub struct HookGuard {
    _hook: HookRc,
}

impl std::fmt::Debug for HookGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookGuard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::CounterState;
    use std::cell::RefCell;

    fn transition(old: i64, new: i64) -> Transition {
        Transition {
            old: CounterState::new(old, 0, 99).unwrap(),
            new: CounterState::new(new, 0, 99).unwrap(),
        }
    }

    #[test]
    fn hooks_run_in_registration_order() {
        let mut hooks = ChangeHooks::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&order);
        let b = Rc::clone(&order);
        let _ga = hooks.subscribe(move |_| a.borrow_mut().push('a'));
        let _gb = hooks.subscribe(move |_| b.borrow_mut().push('b'));

        hooks.run(&transition(1, 2));
        assert_eq!(*order.borrow(), vec!['a', 'b']);
    }

    #[test]
    fn dead_hooks_are_pruned_on_run() {
        let mut hooks = ChangeHooks::new();
        let g1 = hooks.subscribe(|_| {});
        let _g2 = hooks.subscribe(|_| {});
        assert_eq!(hooks.len(), 2);

        drop(g1);
        hooks.run(&transition(1, 2));
        assert_eq!(hooks.len(), 1);
    }

    #[test]
    fn run_without_hooks_is_noop() {
        let mut hooks = ChangeHooks::new();
        hooks.run(&transition(3, 4));
        assert_eq!(hooks.len(), 0);
    }
}
