#![forbid(unsafe_code)]

//! The counter panel: title, readout, the two buttons, and a range caption.
//!
//! ```text
//! ╭──────────────────────────╮
//! │         Counter          │
//! │            18            │
//! │                          │
//! │  + Increase  - Decrease  │
//! │    Range 0 to 99         │
//! ╰──────────────────────────╯
//! ```
//!
//! The readout color follows [`Tone`]. Button disabled state follows
//! [`Presentation`]; disabled buttons register no hit region, so clicks on
//! them never reach the model.

use tally_core::{Presentation, Tone};
use tally_render::{Frame, HitId, InteractionState, PackedRgba, Rect, Style};

use crate::button::Button;
use crate::panel::Panel;
use crate::{Widget, draw_centered, text_width};

/// Gap between the two buttons.
const BUTTON_GAP: u16 = 2;
/// Border plus one cell of padding on each side.
const CHROME: u16 = 4;
/// Border rows plus title, readout, spacer, buttons, caption.
const HEIGHT: u16 = 7;

/// One of the two counter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Increase,
    Decrease,
}

impl ButtonKind {
    pub const INCREASE_HIT: HitId = HitId::new(1);
    pub const DECREASE_HIT: HitId = HitId::new(2);

    #[must_use]
    pub const fn hit_id(self) -> HitId {
        match self {
            Self::Increase => Self::INCREASE_HIT,
            Self::Decrease => Self::DECREASE_HIT,
        }
    }

    #[must_use]
    pub fn from_hit(id: HitId) -> Option<Self> {
        match id {
            Self::INCREASE_HIT => Some(Self::Increase),
            Self::DECREASE_HIT => Some(Self::Decrease),
            _ => None,
        }
    }

    /// The adjustment one activation performs.
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Increase => 1,
            Self::Decrease => -1,
        }
    }

    const fn glyph(self) -> char {
        match self {
            Self::Increase => '+',
            Self::Decrease => '-',
        }
    }
}

/// Readout color for a tone.
#[must_use]
pub const fn tone_color(tone: Tone) -> PackedRgba {
    match tone {
        Tone::Normal => PackedRgba::WHITE,
        Tone::Warning => PackedRgba::YELLOW,
        Tone::Success => PackedRgba::GREEN,
        Tone::Limit => PackedRgba::RED,
    }
}

/// Localized static text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterLabels<'a> {
    pub title: &'a str,
    pub increase: &'a str,
    pub decrease: &'a str,
    /// Already interpolated, e.g. "Range 0 to 99".
    pub caption: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct CounterView<'a> {
    value: i64,
    presentation: Presentation,
    labels: CounterLabels<'a>,
    rtl: bool,
    hovered: Option<ButtonKind>,
    pressed: Option<ButtonKind>,
}

impl<'a> CounterView<'a> {
    #[must_use]
    pub fn new(value: i64, presentation: Presentation) -> Self {
        Self {
            value,
            presentation,
            labels: CounterLabels::default(),
            rtl: false,
            hovered: None,
            pressed: None,
        }
    }

    #[must_use]
    pub fn labels(mut self, labels: CounterLabels<'a>) -> Self {
        self.labels = labels;
        self
    }

    /// Lay the buttons out right to left.
    #[must_use]
    pub fn rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    #[must_use]
    pub fn hovered(mut self, kind: Option<ButtonKind>) -> Self {
        self.hovered = kind;
        self
    }

    #[must_use]
    pub fn pressed(mut self, kind: Option<ButtonKind>) -> Self {
        self.pressed = kind;
        self
    }

    /// Interaction state of one button; disabled wins over pointer state.
    #[must_use]
    pub fn button_state(&self, kind: ButtonKind) -> InteractionState {
        let disabled = match kind {
            ButtonKind::Increase => self.presentation.increment_disabled,
            ButtonKind::Decrease => self.presentation.decrement_disabled,
        };
        if disabled {
            InteractionState::Disabled
        } else if self.pressed == Some(kind) {
            InteractionState::Active
        } else if self.hovered == Some(kind) {
            InteractionState::Hovered
        } else {
            InteractionState::Normal
        }
    }

    fn button_label(&self, kind: ButtonKind) -> String {
        let text = match kind {
            ButtonKind::Increase => self.labels.increase,
            ButtonKind::Decrease => self.labels.decrease,
        };
        if text.is_empty() {
            kind.glyph().to_string()
        } else {
            format!("{} {text}", kind.glyph())
        }
    }

    /// Buttons in visual order; the increase button leads.
    fn button_order(&self) -> [ButtonKind; 2] {
        if self.rtl {
            [ButtonKind::Decrease, ButtonKind::Increase]
        } else {
            [ButtonKind::Increase, ButtonKind::Decrease]
        }
    }

    /// Preferred `(width, height)` of the panel.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        let buttons = self
            .button_order()
            .iter()
            .map(|kind| text_width(&self.button_label(*kind)) + 2)
            .sum::<u16>()
            + BUTTON_GAP;
        let content = [
            text_width(self.labels.title),
            text_width(&self.value.to_string()),
            text_width(self.labels.caption),
            buttons,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        (content.saturating_add(CHROME), HEIGHT)
    }
}

impl Widget for CounterView<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "CounterView",
            value = self.value,
            tone = self.presentation.tone.as_str()
        )
        .entered();

        let (width, height) = self.size();
        let panel_area = area.centered(width, height);
        let text = Style::new().fg(PackedRgba::BLACK);
        let panel = Panel::new()
            .style(text.bg(PackedRgba::LIGHT_BLUE))
            .border_style(Style::new().bold());
        panel.render(panel_area, frame);

        let inner = panel.inner(panel_area);
        let inner = Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );

        if let Some(row) = inner.row(0) {
            draw_centered(frame, row, self.labels.title, text.bold());
        }
        if let Some(row) = inner.row(1) {
            let readout = Style::new()
                .fg(tone_color(self.presentation.tone))
                .bold();
            draw_centered(frame, row, &self.value.to_string(), readout);
        }
        if let Some(row) = inner.row(3) {
            let labels = self.button_order().map(|kind| (kind, self.button_label(kind)));
            let total = labels
                .iter()
                .map(|(_, label)| text_width(label) + 2)
                .sum::<u16>()
                + BUTTON_GAP;
            let mut x = row.x + row.width.saturating_sub(total) / 2;
            for (kind, label) in &labels {
                let button = Button::new(label)
                    .state(self.button_state(*kind))
                    .hit_id(kind.hit_id());
                let w = button.width();
                button.render(Rect::new(x, row.y, w, 1).intersection(&row), frame);
                x = x.saturating_add(w + BUTTON_GAP);
            }
        }
        if let Some(row) = inner.row(4) {
            draw_centered(frame, row, self.labels.caption, text.dim());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{CounterState, Thresholds};
    use tally_render::StyleFlags;

    fn view_for(value: i64) -> (CounterView<'static>, Frame) {
        let state = CounterState::new(value, 0, 99).unwrap();
        let presentation = Presentation::derive(&state, &Thresholds::default());
        let view = CounterView::new(value, presentation).labels(CounterLabels {
            title: "Counter",
            increase: "Increase",
            decrease: "Decrease",
            caption: "Range 0 to 99",
        });
        let mut frame = Frame::new(40, 9);
        view.render(frame.bounds(), &mut frame);
        (view, frame)
    }

    fn find(frame: &Frame, text: &str) -> Option<(u16, u16)> {
        (0..frame.height()).find_map(|y| {
            let row = frame.buffer.row_text(y);
            row.find(text).map(|byte| {
                let col = row[..byte].chars().count() as u16;
                (col, y)
            })
        })
    }

    fn readout_fg(frame: &Frame, value: i64) -> PackedRgba {
        let (x, y) = find(frame, &value.to_string()).unwrap();
        frame.buffer.get(x, y).unwrap().fg
    }

    #[test]
    fn readout_color_follows_tone() {
        assert_eq!(readout_fg(&view_for(5).1, 5), PackedRgba::WHITE);
        assert_eq!(readout_fg(&view_for(18).1, 18), PackedRgba::YELLOW);
        assert_eq!(readout_fg(&view_for(21).1, 21), PackedRgba::GREEN);
        assert_eq!(readout_fg(&view_for(99).1, 99), PackedRgba::RED);
        assert_eq!(readout_fg(&view_for(0).1, 0), PackedRgba::RED);
    }

    #[test]
    fn renders_labels() {
        let (_, frame) = view_for(5);
        assert!(find(&frame, "Counter").is_some());
        assert!(find(&frame, "+ Increase").is_some());
        assert!(find(&frame, "- Decrease").is_some());
        assert!(find(&frame, "Range 0 to 99").is_some());
    }

    #[test]
    fn increase_leads_left_to_right() {
        let (_, frame) = view_for(5);
        let (inc, _) = find(&frame, "+ Increase").unwrap();
        let (dec, _) = find(&frame, "- Decrease").unwrap();
        assert!(inc < dec);
    }

    #[test]
    fn rtl_mirrors_buttons() {
        let state = CounterState::new(5, 0, 99).unwrap();
        let presentation = Presentation::derive(&state, &Thresholds::default());
        let view = CounterView::new(5, presentation)
            .labels(CounterLabels {
                increase: "inc",
                decrease: "dec",
                ..CounterLabels::default()
            })
            .rtl(true);
        let mut frame = Frame::new(30, 9);
        view.render(frame.bounds(), &mut frame);
        let (inc, _) = find(&frame, "+ inc").unwrap();
        let (dec, _) = find(&frame, "- dec").unwrap();
        assert!(dec < inc);
    }

    #[test]
    fn buttons_register_hits() {
        let (_, frame) = view_for(5);
        let (x, y) = find(&frame, "+ Increase").unwrap();
        assert_eq!(frame.hit_test(x, y), Some(ButtonKind::INCREASE_HIT));
        let (x, y) = find(&frame, "- Decrease").unwrap();
        assert_eq!(frame.hit_test(x, y), Some(ButtonKind::DECREASE_HIT));
    }

    #[test]
    fn disabled_decrease_at_min() {
        let (view, frame) = view_for(0);
        assert_eq!(
            view.button_state(ButtonKind::Decrease),
            InteractionState::Disabled
        );
        let (x, y) = find(&frame, "- Decrease").unwrap();
        let cell = frame.buffer.get(x, y).unwrap();
        assert_eq!(cell.fg, PackedRgba::GRAY);
        assert!(cell.attrs.contains(StyleFlags::DIM));
        assert_eq!(frame.hit_test(x, y), None);
    }

    #[test]
    fn disabled_increase_at_max() {
        let (view, frame) = view_for(99);
        assert_eq!(
            view.button_state(ButtonKind::Increase),
            InteractionState::Disabled
        );
        assert_eq!(
            view.button_state(ButtonKind::Decrease),
            InteractionState::Normal
        );
        let (x, y) = find(&frame, "+ Increase").unwrap();
        assert_eq!(frame.hit_test(x, y), None);
    }

    #[test]
    fn disabled_wins_over_hover() {
        let (view, _) = view_for(99);
        let view = view
            .hovered(Some(ButtonKind::Increase))
            .pressed(Some(ButtonKind::Decrease));
        assert_eq!(
            view.button_state(ButtonKind::Increase),
            InteractionState::Disabled
        );
        assert_eq!(
            view.button_state(ButtonKind::Decrease),
            InteractionState::Active
        );
    }

    #[test]
    fn hit_ids_round_trip() {
        for kind in [ButtonKind::Increase, ButtonKind::Decrease] {
            assert_eq!(ButtonKind::from_hit(kind.hit_id()), Some(kind));
        }
        assert_eq!(ButtonKind::from_hit(HitId::new(99)), None);
    }

    #[test]
    fn size_fits_widest_line() {
        let (view, _) = view_for(5);
        let (w, h) = view.size();
        assert_eq!(h, 7);
        // two 10-wide labels, 1 cell padding each side, gap 2, chrome 4
        assert_eq!(w, 30);
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn render_emits_widget_span() {
        use std::sync::{Arc, Mutex};
        use tracing_subscriber::Layer;
        use tracing_subscriber::layer::{Context, SubscriberExt};

        struct SpanNames(Arc<Mutex<Vec<String>>>);

        impl<S: tracing::Subscriber> Layer<S> for SpanNames {
            fn on_new_span(
                &self,
                attrs: &tracing::span::Attributes<'_>,
                _id: &tracing::Id,
                _ctx: Context<'_, S>,
            ) {
                self.0
                    .lock()
                    .expect("span lock")
                    .push(attrs.metadata().name().to_string());
            }
        }

        let names = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(SpanNames(Arc::clone(&names)));
        let _guard = tracing::subscriber::set_default(subscriber);

        let _ = view_for(18);

        let names = names.lock().expect("span lock");
        assert!(names.iter().any(|name| name == "widget_render"));
    }
}
