//! Property-based invariant tests for the dispatcher.
//!
//! 1. Deferred messages are delivered on the next tick, before `Event::Tick`
//! 2. Deferred messages keep the order they were deferred in
//! 3. Immediate messages are never held back by pending deferrals

use proptest::prelude::*;
use tally_render::Frame;
use tally_runtime::{Cmd, Event, Model, ProgramSimulator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Msg {
    Now(u32),
    Later(u32),
    Deliver(u32),
    Tick,
    Other,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Tick => Msg::Tick,
            _ => Msg::Other,
        }
    }
}

#[derive(Default)]
struct Trace {
    seen: Vec<Msg>,
}

impl Model for Trace {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        self.seen.push(msg);
        match msg {
            Msg::Later(n) => Cmd::defer(Msg::Deliver(n)),
            _ => Cmd::none(),
        }
    }

    fn view(&self, _frame: &mut Frame) {}
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Now(u32),
    Later(u32),
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..1000).prop_map(Op::Now),
        (0u32..1000).prop_map(Op::Later),
        Just(Op::Tick),
    ]
}

proptest! {
    #[test]
    fn deferred_messages_arrive_on_next_tick_in_order(
        ops in prop::collection::vec(op(), 0..80),
    ) {
        let mut sim = ProgramSimulator::with_size(Trace::default(), 4, 2);
        sim.init();

        let mut expected = Vec::new();
        let mut pending = Vec::new();
        for op in ops {
            match op {
                Op::Now(n) => {
                    sim.send(Msg::Now(n));
                    expected.push(Msg::Now(n));
                }
                Op::Later(n) => {
                    sim.send(Msg::Later(n));
                    expected.push(Msg::Later(n));
                    pending.push(n);
                }
                Op::Tick => {
                    sim.tick();
                    expected.extend(pending.drain(..).map(Msg::Deliver));
                    expected.push(Msg::Tick);
                }
            }
            prop_assert_eq!(sim.pending_deferred(), pending.len());
        }

        prop_assert_eq!(&sim.model().seen, &expected);
    }
}
