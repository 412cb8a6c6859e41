#![forbid(unsafe_code)]

//! Elm-style runtime for terminal applications.
//!
//! A [`Model`] owns application state. Input arrives as messages, `update`
//! mutates the model and returns a [`Cmd`] describing follow-up effects,
//! and `view` draws the current state into a frame.
//!
//! # Deferred messages
//!
//! [`Cmd::Defer`] queues a message for the *next* tick instead of handling
//! it immediately. On each tick the runtime first delivers the messages
//! that were queued before the tick started, in order, then delivers
//! [`Event::Tick`]. Messages deferred while draining wait for the tick
//! after. Input is never reordered: deferral only postpones the one
//! message, every `update` still runs to completion before the next.
//!
//! # Example
//!
//! ```ignore
//! use tally_runtime::{Cmd, Event, Model};
//! use tally_render::{Frame, HitId};
//!
//! struct Clicks(u32);
//!
//! enum Msg { Click, Other }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char(' ') => Msg::Click,
//!             _ => Msg::Other,
//!         }
//!     }
//! }
//!
//! impl Model for Clicks {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         if let Msg::Click = msg { self.0 += 1; }
//!         Cmd::none()
//!     }
//!
//!     fn view(&self, _frame: &mut Frame) {}
//! }
//! ```

use std::collections::VecDeque;
use std::io::{self, Stdout, Write};

use tally_render::{Frame, HitId};
use tracing::{debug, debug_span, trace};
use web_time::{Duration, Instant};

use crate::event::Event;
use crate::presenter::Presenter;
use crate::terminal::{SessionOptions, TerminalSession};

/// Application state and behavior.
pub trait Model: Sized {
    /// Messages that drive `update`. Terminal events convert into them.
    type Message: From<Event> + Send + 'static;

    /// Called once before the first frame.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Handle one message.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Draw the current state.
    fn view(&self, frame: &mut Frame);
}

/// Side effects requested by `init` and `update`.
#[derive(Debug)]
pub enum Cmd<M> {
    None,
    Quit,
    /// Run each command in order; stops early on quit.
    Batch(Vec<Cmd<M>>),
    /// Run each command in order; stops early on quit.
    Sequence(Vec<Cmd<M>>),
    /// Deliver a message immediately.
    Msg(M),
    /// Deliver a message at the start of the next tick.
    Defer(M),
    /// Deliver [`Event::Tick`] at this interval from now on.
    Tick(Duration),
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn defer(m: M) -> Self {
        Self::Defer(m)
    }

    #[inline]
    pub fn tick(every: Duration) -> Self {
        Self::Tick(every)
    }

    /// Combine commands, collapsing empty and single-element lists.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    /// Like [`batch`](Self::batch), but emphasizes ordering.
    pub fn sequence(cmds: Vec<Self>) -> Self {
        match Self::batch(cmds) {
            Self::Batch(cmds) => Self::Sequence(cmds),
            other => other,
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Model plus the command interpreter shared by [`Program`] and the
/// simulator.
pub(crate) struct Dispatcher<M: Model> {
    pub(crate) model: M,
    pub(crate) running: bool,
    pub(crate) tick_rate: Option<Duration>,
    pub(crate) deferred: VecDeque<M::Message>,
    pub(crate) dirty: bool,
}

impl<M: Model> Dispatcher<M> {
    pub(crate) fn new(model: M) -> Self {
        Self {
            model,
            running: true,
            tick_rate: None,
            deferred: VecDeque::new(),
            dirty: true,
        }
    }

    pub(crate) fn init(&mut self) {
        let cmd = self.model.init();
        self.execute(cmd);
    }

    pub(crate) fn dispatch(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.execute(cmd);
    }

    pub(crate) fn execute(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => {
                debug!("quit requested");
                self.running = false;
            }
            Cmd::Batch(cmds) | Cmd::Sequence(cmds) => {
                for c in cmds {
                    if !self.running {
                        break;
                    }
                    self.execute(c);
                }
            }
            Cmd::Msg(m) => self.dispatch(m),
            Cmd::Defer(m) => {
                self.deferred.push_back(m);
                trace!(pending = self.deferred.len(), "message deferred to next tick");
            }
            Cmd::Tick(every) => {
                self.tick_rate = Some(every);
            }
        }
    }

    /// Deliver messages deferred before this tick, then the tick itself.
    pub(crate) fn tick(&mut self) {
        let _span = debug_span!("runtime.tick", deferred = self.deferred.len()).entered();
        let ready: Vec<_> = self.deferred.drain(..).collect();
        for msg in ready {
            self.dispatch(msg);
        }
        self.dispatch(Event::Tick.into());
    }
}

/// Where the UI is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    /// Take over the whole terminal.
    AltScreen,
    /// Draw in the bottom `ui_height` rows, leaving scrollback intact.
    Inline { ui_height: u16 },
}

#[derive(Debug, Clone)]
pub struct ProgramConfig {
    pub screen_mode: ScreenMode,
    /// Longest wait for input when no tick is due.
    pub poll_timeout: Duration,
    pub mouse: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            screen_mode: ScreenMode::AltScreen,
            poll_timeout: Duration::from_millis(100),
            mouse: true,
        }
    }
}

impl ProgramConfig {
    #[must_use]
    pub fn fullscreen() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn inline(height: u16) -> Self {
        Self {
            screen_mode: ScreenMode::Inline { ui_height: height },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }
}

/// The runtime that owns the terminal and drives a model.
pub struct Program<M: Model, W: Write = Stdout> {
    core: Dispatcher<M>,
    presenter: Presenter<W>,
    config: ProgramConfig,
    size: (u16, u16),
    last_tick: Instant,
    last_frame: Option<Frame>,
    /// Terminal row of the last frame's top edge.
    origin_y: u16,
}

impl<M: Model> Program<M, Stdout> {
    pub fn new(model: M) -> Self {
        Self::with_config(model, ProgramConfig::default())
    }

    pub fn with_config(model: M, config: ProgramConfig) -> Self {
        Self::with_writer(model, config, io::stdout())
    }
}

impl<M: Model, W: Write> Program<M, W> {
    pub fn with_writer(model: M, config: ProgramConfig, writer: W) -> Self {
        Self {
            core: Dispatcher::new(model),
            presenter: Presenter::new(writer),
            config,
            size: (80, 24),
            last_tick: Instant::now(),
            last_frame: None,
            origin_y: 0,
        }
    }

    /// Run until the model quits. The terminal is restored on return,
    /// including when an error propagates.
    pub fn run(&mut self) -> io::Result<()> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: self.config.screen_mode == ScreenMode::AltScreen,
            mouse_capture: self.config.mouse,
        })?;
        self.size = session.size()?;
        if let ScreenMode::Inline { ui_height } = self.config.screen_mode {
            self.presenter.reserve_rows(ui_height)?;
        }
        debug!(
            width = self.size.0,
            height = self.size.1,
            mode = ?self.config.screen_mode,
            "program started"
        );

        self.core.init();
        self.last_tick = Instant::now();

        while self.core.running {
            if self.core.dirty {
                self.render_frame()?;
            }
            let timeout = self.effective_timeout();
            if session.poll_event(timeout)? {
                if let Some(event) = session.read_event()? {
                    self.handle_event(event);
                }
            }
            if self.tick_due() {
                self.last_tick = Instant::now();
                self.core.tick();
            }
        }

        debug!("program stopped");
        drop(session);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let event = match event {
            Event::Resize { width, height } => {
                self.size = (width, height);
                self.core.dirty = true;
                event
            }
            Event::Mouse(mut mouse) => {
                mouse.hit = self.hit_at(mouse.x, mouse.y);
                Event::Mouse(mouse)
            }
            other => other,
        };
        self.core.dispatch(event.into());
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let (width, height) = match self.config.screen_mode {
            ScreenMode::AltScreen => self.size,
            ScreenMode::Inline { ui_height } => (self.size.0, ui_height.min(self.size.1)),
        };
        let origin_y = self.size.1.saturating_sub(height);
        let mut frame = Frame::new(width, height);
        self.core.model.view(&mut frame);
        self.presenter.present(&frame.buffer, origin_y)?;
        self.last_frame = Some(frame);
        self.origin_y = origin_y;
        self.core.dirty = false;
        Ok(())
    }

    /// Hit region under terminal cell `(x, y)`. Rows above an inline frame
    /// belong to scrollback and never hit.
    fn hit_at(&self, x: u16, y: u16) -> Option<HitId> {
        let row = y.checked_sub(self.origin_y)?;
        self.last_frame.as_ref()?.hit_test(x, row)
    }

    fn effective_timeout(&self) -> Duration {
        match self.core.tick_rate {
            Some(rate) => rate
                .saturating_sub(self.last_tick.elapsed())
                .min(self.config.poll_timeout),
            None if !self.core.deferred.is_empty() => Duration::ZERO,
            None => self.config.poll_timeout,
        }
    }

    fn tick_due(&self) -> bool {
        match self.core.tick_rate {
            Some(rate) => self.last_tick.elapsed() >= rate,
            None => !self.core.deferred.is_empty(),
        }
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
}
