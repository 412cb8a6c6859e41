#![forbid(unsafe_code)]

//! Push button.

use tally_render::{
    Frame, HitId, InteractionState, InteractiveStyle, PackedRgba, Rect, Style,
};

use crate::{Widget, draw_centered, text_width};

/// Black button with white text; red text on hover, inverted while pressed,
/// gray and dim when disabled.
#[must_use]
pub fn button_style() -> InteractiveStyle {
    InteractiveStyle::new(
        Style::new()
            .fg(PackedRgba::WHITE)
            .bg(PackedRgba::BLACK)
            .bold(),
    )
    .hover(Style::new().fg(PackedRgba::RED))
    .active(Style::new().fg(PackedRgba::RED).bg(PackedRgba::WHITE))
    .disabled(Style::new().fg(PackedRgba::GRAY).dim())
}

/// A single-row button with a centered label.
///
/// Enabled buttons with a hit id register their whole area for mouse
/// hit testing; disabled buttons register nothing.
#[derive(Debug, Clone, Copy)]
pub struct Button<'a> {
    label: &'a str,
    style: InteractiveStyle,
    state: InteractionState,
    hit_id: Option<HitId>,
}

impl<'a> Button<'a> {
    #[must_use]
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            style: button_style(),
            state: InteractionState::Normal,
            hit_id: None,
        }
    }

    #[must_use]
    pub fn style(mut self, style: InteractiveStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn state(mut self, state: InteractionState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.state == InteractionState::Disabled
    }

    /// Width including one cell of padding on each side.
    #[must_use]
    pub fn width(&self) -> u16 {
        text_width(self.label).saturating_add(2)
    }
}

impl Widget for Button<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Button",
            x = area.x,
            y = area.y,
            w = area.width,
            state = ?self.state
        )
        .entered();

        let area = area.intersection(&frame.bounds());
        if area.is_empty() {
            return;
        }
        let style = self.style.resolve(self.state);
        frame.buffer.set_style(area, style);
        if let Some(row) = area.row(area.height / 2) {
            draw_centered(frame, row, self.label, style);
        }
        if !self.is_disabled() {
            if let Some(id) = self.hit_id {
                frame.register_hit(area, id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_render::StyleFlags;

    #[test]
    fn renders_label_with_padding() {
        let mut frame = Frame::new(5, 1);
        let button = Button::new("+");
        assert_eq!(button.width(), 3);
        button.render(Rect::new(0, 0, 3, 1), &mut frame);
        assert_eq!(frame.buffer.row_text(0), " +");
        assert_eq!(frame.buffer.get(0, 0).unwrap().bg, PackedRgba::BLACK);
        assert_eq!(frame.buffer.get(1, 0).unwrap().fg, PackedRgba::WHITE);
    }

    #[test]
    fn hover_turns_label_red() {
        let mut frame = Frame::new(3, 1);
        Button::new("+")
            .state(InteractionState::Hovered)
            .render(frame.bounds(), &mut frame);
        let cell = frame.buffer.get(1, 0).unwrap();
        assert_eq!(cell.fg, PackedRgba::RED);
        assert_eq!(cell.bg, PackedRgba::BLACK);
    }

    #[test]
    fn disabled_is_dim_and_not_clickable() {
        let mut frame = Frame::new(3, 1);
        Button::new("-")
            .state(InteractionState::Disabled)
            .hit_id(HitId::new(1))
            .render(frame.bounds(), &mut frame);
        let cell = frame.buffer.get(1, 0).unwrap();
        assert_eq!(cell.fg, PackedRgba::GRAY);
        assert!(cell.attrs.contains(StyleFlags::DIM));
        assert_eq!(frame.hit_test(1, 0), None);
    }

    #[test]
    fn enabled_registers_hit() {
        let mut frame = Frame::new(5, 1);
        Button::new("+")
            .hit_id(HitId::new(9))
            .render(Rect::new(1, 0, 3, 1), &mut frame);
        assert_eq!(frame.hit_test(0, 0), None);
        assert_eq!(frame.hit_test(3, 0), Some(HitId::new(9)));
    }
}
