//! Property-based invariant tests for the counter app.
//!
//! 1. The value stays within bounds for any input sequence.
//! 2. Every entry into the celebration value pops the confetti exactly once,
//!    and never before the tick that follows it.
//! 3. Presentation always matches the counter's current state.

use proptest::prelude::*;
use tally::{CounterApp, Msg};
use tally_core::{CounterConfig, Presentation, Thresholds};
use tally_i18n::embedded_catalog;
use tally_runtime::ProgramSimulator;

#[derive(Debug, Clone, Copy)]
enum Step {
    Up,
    Down,
    Tick,
}

fn steps() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(Step::Up),
            2 => Just(Step::Down),
            1 => Just(Step::Tick),
        ],
        0..120,
    )
}

proptest! {
    #[test]
    fn app_invariants(start in 0i64..=30, steps in steps()) {
        let config = CounterConfig { value: start, max: 30, ..CounterConfig::default() };
        let app = CounterApp::new(&config, embedded_catalog().unwrap(), "en")
            .unwrap()
            .with_confetti_seed(9);
        let mut sim = ProgramSimulator::new(app);
        sim.init();

        let mut value = start;
        let mut entries = 0u64;
        for step in steps {
            let before_bursts = sim.model().confetti_bursts();
            match step {
                Step::Up => sim.send(Msg::Increase),
                Step::Down => sim.send(Msg::Decrease),
                Step::Tick => sim.tick(),
            }
            let now = sim.model().value();
            prop_assert!((0..=30).contains(&now));
            if now == 21 && value != 21 {
                entries += 1;
            }
            if !matches!(step, Step::Tick) {
                prop_assert_eq!(sim.model().confetti_bursts(), before_bursts);
            }
            value = now;

            let expected = Presentation::derive(
                &sim.model().counter().state(),
                &Thresholds::default(),
            );
            prop_assert_eq!(sim.model().presentation(), expected);
        }

        sim.tick();
        prop_assert_eq!(sim.model().celebrations(), entries);
        prop_assert_eq!(sim.model().confetti_bursts(), entries);
    }
}
