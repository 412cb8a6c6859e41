#![forbid(unsafe_code)]

//! Style variants for controls that react to the pointer and keyboard.
//!
//! [`InteractiveStyle`] is the terminal counterpart of CSS pseudo-classes
//! (`:hover`, `:focus`, `:active`, `:disabled`). Resolving a state patches
//! its override on top of the normal style.

use crate::style::Style;

/// How the user is currently interacting with a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    #[default]
    Normal,
    /// Pointer is over the control.
    Hovered,
    /// Control has keyboard focus.
    Focused,
    /// Control is being pressed.
    Active,
    /// Control does not accept input.
    Disabled,
}

/// Normal style plus optional per-state overrides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractiveStyle {
    pub normal: Style,
    pub hover: Option<Style>,
    pub focus: Option<Style>,
    pub active: Option<Style>,
    pub disabled: Option<Style>,
}

impl InteractiveStyle {
    #[must_use]
    pub const fn new(normal: Style) -> Self {
        Self {
            normal,
            hover: None,
            focus: None,
            active: None,
            disabled: None,
        }
    }

    #[must_use]
    pub const fn hover(mut self, style: Style) -> Self {
        self.hover = Some(style);
        self
    }

    #[must_use]
    pub const fn focused(mut self, style: Style) -> Self {
        self.focus = Some(style);
        self
    }

    #[must_use]
    pub const fn active(mut self, style: Style) -> Self {
        self.active = Some(style);
        self
    }

    #[must_use]
    pub const fn disabled(mut self, style: Style) -> Self {
        self.disabled = Some(style);
        self
    }

    /// The effective style for `state`.
    #[must_use]
    pub fn resolve(&self, state: InteractionState) -> Style {
        let overlay = match state {
            InteractionState::Normal => None,
            InteractionState::Hovered => self.hover,
            InteractionState::Focused => self.focus,
            InteractionState::Active => self.active,
            InteractionState::Disabled => self.disabled,
        };
        match overlay {
            Some(o) => self.normal.patch(&o),
            None => self.normal,
        }
    }
}

impl From<Style> for InteractiveStyle {
    fn from(style: Style) -> Self {
        Self::new(style)
    }
}
