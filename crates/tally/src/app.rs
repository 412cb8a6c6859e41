//! The counter model.
//!
//! Wires a [`BoundedCounter`] to the runtime:
//!
//! - key presses and button clicks become [`Msg::Increase`] /
//!   [`Msg::Decrease`], each one `adjust(±1)`;
//! - a change hook on the counter recomputes [`Presentation`] and feeds the
//!   [`CelebrationLatch`];
//! - an entry into the celebration value defers [`Msg::Celebrate`] to the
//!   next tick, which pops the lazily built confetti.

use std::cell::Cell;
use std::rc::Rc;

use tally_core::{
    BoundedCounter, Celebration, CelebrationLatch, CounterConfig, HookGuard, LazyCelebration,
    Presentation,
};
use tally_i18n::{I18nError, LocaleInfo, StringCatalog, locale_info, next_locale};
use tally_render::{PackedRgba, Rect, Style};
use tally_runtime::{Cmd, Event, KeyCode, KeyEventKind, Model, MouseButton, MouseEventKind};
use tally_widgets::{ButtonKind, ConfettiFx, CounterLabels, CounterView, Widget, draw_centered};
use tracing::{debug, info, trace};
use web_time::Duration;

use crate::error::Result;

/// Tick interval; also the confetti time step.
pub const TICK: Duration = Duration::from_millis(16);

/// Rows the app draws: message, panel, language, hint.
pub const UI_HEIGHT: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Increase,
    Decrease,
    /// Mouse down on a button.
    Press(ButtonKind),
    /// Mouse up, over a button or not.
    Release(Option<ButtonKind>),
    Hover(Option<ButtonKind>),
    CycleLocale,
    Celebrate,
    Tick,
    Quit,
    Noop,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Release => Msg::Noop,
            Event::Key(key) if key.ctrl() && key.is_char('c') => Msg::Quit,
            Event::Key(key) => match key.code {
                KeyCode::Char('+' | '=' | 'k') | KeyCode::Up => Msg::Increase,
                KeyCode::Char('-' | '_' | 'j') | KeyCode::Down => Msg::Decrease,
                KeyCode::Char('l') => Msg::CycleLocale,
                KeyCode::Char('q') | KeyCode::Escape => Msg::Quit,
                _ => Msg::Noop,
            },
            Event::Mouse(mouse) => {
                let target = mouse.hit.and_then(ButtonKind::from_hit);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => target.map_or(Msg::Noop, Msg::Press),
                    MouseEventKind::Up(MouseButton::Left) => Msg::Release(target),
                    MouseEventKind::Moved => Msg::Hover(target),
                    _ => Msg::Noop,
                }
            }
            Event::Tick => Msg::Tick,
            Event::Resize { .. } | Event::Focus(_) => Msg::Noop,
        }
    }
}

pub struct CounterApp {
    counter: BoundedCounter,
    presentation: Rc<Cell<Presentation>>,
    latch: Rc<Cell<CelebrationLatch>>,
    /// Entries into the celebration value not yet scheduled.
    pending: Rc<Cell<u32>>,
    _hook: HookGuard,
    confetti: LazyCelebration<ConfettiFx>,
    catalog: StringCatalog,
    locale: &'static LocaleInfo,
    hovered: Option<ButtonKind>,
    pressed: Option<ButtonKind>,
}

impl CounterApp {
    /// Build the app. `locale` is negotiated against the catalog
    /// (`zh-CN` selects `zh`).
    pub fn new(config: &CounterConfig, catalog: StringCatalog, locale: &str) -> Result<Self> {
        let locale = catalog
            .negotiate(locale)
            .and_then(locale_info)
            .ok_or_else(|| I18nError::UnknownLocale(locale.to_string()))?;

        let mut counter = config.build()?;
        let thresholds = config.thresholds();
        let presentation = Rc::new(Cell::new(Presentation::derive(
            &counter.state(),
            &thresholds,
        )));
        let latch = Rc::new(Cell::new(CelebrationLatch::new(thresholds.celebration)));
        let pending = Rc::new(Cell::new(0));

        let hook = {
            let presentation = Rc::clone(&presentation);
            let latch = Rc::clone(&latch);
            let pending = Rc::clone(&pending);
            counter.on_change(move |transition| {
                presentation.set(Presentation::derive(&transition.new, &thresholds));
                let mut l = latch.get();
                if l.observe(transition) {
                    pending.set(pending.get() + 1);
                }
                latch.set(l);
            })
        };

        debug!(
            value = counter.value(),
            locale = locale.tag,
            "counter app created"
        );
        Ok(Self {
            counter,
            presentation,
            latch,
            pending,
            _hook: hook,
            confetti: LazyCelebration::new(ConfettiFx::new),
            catalog,
            locale,
            hovered: None,
            pressed: None,
        })
    }

    /// Use a seeded confetti generator, for reproducible runs.
    #[must_use]
    pub fn with_confetti_seed(mut self, seed: u64) -> Self {
        self.confetti = LazyCelebration::new(move || ConfettiFx::with_seed(seed));
        self
    }

    #[must_use]
    pub fn value(&self) -> i64 {
        self.counter.value()
    }

    #[must_use]
    pub fn counter(&self) -> &BoundedCounter {
        &self.counter
    }

    #[must_use]
    pub fn presentation(&self) -> Presentation {
        self.presentation.get()
    }

    #[must_use]
    pub fn locale(&self) -> &'static LocaleInfo {
        self.locale
    }

    /// Times the celebration value was entered.
    #[must_use]
    pub fn celebrations(&self) -> u64 {
        self.latch.get().fired()
    }

    #[must_use]
    pub fn confetti_loaded(&self) -> bool {
        self.confetti.is_loaded()
    }

    /// Bursts the confetti actually popped.
    #[must_use]
    pub fn confetti_bursts(&self) -> u64 {
        self.confetti.get().map_or(0, ConfettiFx::bursts)
    }

    #[must_use]
    pub fn is_celebrating(&self) -> bool {
        self.confetti.get().is_some_and(ConfettiFx::is_popped)
    }

    fn is_disabled(&self, kind: ButtonKind) -> bool {
        let p = self.presentation.get();
        match kind {
            ButtonKind::Increase => p.increment_disabled,
            ButtonKind::Decrease => p.decrement_disabled,
        }
    }

    fn activate(&mut self, kind: ButtonKind) -> Cmd<Msg> {
        if self.is_disabled(kind) {
            trace!(?kind, value = self.counter.value(), "disabled control ignored");
            return Cmd::none();
        }
        self.counter.adjust(kind.delta());
        let entries = self.pending.replace(0);
        Cmd::batch((0..entries).map(|_| Cmd::defer(Msg::Celebrate)).collect())
    }

    fn text(&self, key: &'static str) -> &str {
        self.catalog.get_or_key(self.locale.tag, key)
    }
}

impl Model for CounterApp {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::tick(TICK)
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Increase => self.activate(ButtonKind::Increase),
            Msg::Decrease => self.activate(ButtonKind::Decrease),
            Msg::Press(kind) => {
                self.pressed = Some(kind);
                Cmd::none()
            }
            Msg::Release(target) => {
                let pressed = self.pressed.take();
                match target {
                    Some(kind) if pressed == Some(kind) => self.activate(kind),
                    _ => Cmd::none(),
                }
            }
            Msg::Hover(target) => {
                self.hovered = target;
                Cmd::none()
            }
            Msg::CycleLocale => {
                self.locale = next_locale(self.locale.tag);
                info!(locale = self.locale.tag, "locale changed");
                Cmd::none()
            }
            Msg::Celebrate => {
                self.confetti.trigger();
                Cmd::none()
            }
            Msg::Tick => {
                if let Some(fx) = self.confetti.get_mut() {
                    fx.tick(TICK);
                }
                Cmd::none()
            }
            Msg::Quit => Cmd::quit(),
            Msg::Noop => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut tally_render::Frame) {
        let area = frame.bounds();
        let block = area.centered(area.width, UI_HEIGHT);
        let state = self.counter.state();

        if self.is_celebrating() {
            if let Some(row) = block.row(0) {
                let style = Style::new().fg(PackedRgba::GREEN).bold();
                draw_centered(frame, row, self.text("celebrate"), style);
            }
        }

        let caption = self
            .catalog
            .format(
                self.locale.tag,
                "range",
                &[
                    ("min", &state.min().to_string()),
                    ("max", &state.max().to_string()),
                ],
            )
            .unwrap_or_default();
        let labels = CounterLabels {
            title: self.text("title"),
            increase: self.text("increase"),
            decrease: self.text("decrease"),
            caption: &caption,
        };
        let panel = Rect::new(block.x, block.y.saturating_add(1), block.width, 7)
            .intersection(&block);
        CounterView::new(state.value(), self.presentation.get())
            .labels(labels)
            .rtl(self.locale.rtl)
            .hovered(self.hovered)
            .pressed(self.pressed)
            .render(panel, frame);

        let muted = Style::new().fg(PackedRgba::GRAY);
        if let Some(row) = block.row(8) {
            let language = self
                .catalog
                .format(self.locale.tag, "language", &[("name", self.locale.native)])
                .unwrap_or_default();
            draw_centered(frame, row, &language, muted);
        }
        if let Some(row) = block.row(9) {
            draw_centered(frame, row, self.text("hint"), muted);
        }

        if let Some(fx) = self.confetti.get() {
            fx.render(area, frame);
        }
    }
}
