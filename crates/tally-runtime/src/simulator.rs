#![forbid(unsafe_code)]

//! Headless program driver for tests.
//!
//! [`ProgramSimulator`] runs a model through the same command interpreter
//! as [`Program`](crate::Program) but without a terminal. Time never passes
//! on its own: ticks happen only when [`ProgramSimulator::tick`] is called,
//! which keeps deferred-message tests deterministic.

use tally_render::Frame;
use web_time::Duration;

use crate::event::Event;
use crate::program::{Dispatcher, Model};

pub struct ProgramSimulator<M: Model> {
    core: Dispatcher<M>,
    width: u16,
    height: u16,
    last_frame: Option<Frame>,
}

impl<M: Model> ProgramSimulator<M> {
    pub fn new(model: M) -> Self {
        Self::with_size(model, 80, 24)
    }

    pub fn with_size(model: M, width: u16, height: u16) -> Self {
        Self {
            core: Dispatcher::new(model),
            width,
            height,
            last_frame: None,
        }
    }

    /// Run `Model::init` and render the first frame.
    pub fn init(&mut self) {
        self.core.init();
        self.render();
    }

    /// Deliver a message directly.
    pub fn send(&mut self, msg: M::Message) {
        self.core.dispatch(msg);
    }

    /// Deliver a terminal event. Mouse events get their hit region from the
    /// last rendered frame, as they would in a live program.
    pub fn inject_event(&mut self, event: Event) {
        let event = match event {
            Event::Mouse(mut mouse) => {
                mouse.hit = self
                    .last_frame
                    .as_ref()
                    .and_then(|frame| frame.hit_test(mouse.x, mouse.y));
                Event::Mouse(mouse)
            }
            Event::Resize { width, height } => {
                self.width = width;
                self.height = height;
                event
            }
            other => other,
        };
        self.core.dispatch(event.into());
    }

    /// Advance one tick: deferred messages first, then [`Event::Tick`].
    pub fn tick(&mut self) {
        self.core.tick();
    }

    /// Render the model into a fresh frame and keep it for hit testing.
    pub fn render(&mut self) -> &Frame {
        let mut frame = Frame::new(self.width, self.height);
        self.core.model.view(&mut frame);
        self.core.dirty = false;
        self.last_frame.insert(frame)
    }

    /// The most recently rendered frame.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn model(&self) -> &M {
        &self.core.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.core.model
    }

    pub fn is_running(&self) -> bool {
        self.core.running
    }

    pub fn tick_rate(&self) -> Option<Duration> {
        self.core.tick_rate
    }

    /// Messages waiting for the next tick.
    pub fn pending_deferred(&self) -> usize {
        self.core.deferred.len()
    }
}
