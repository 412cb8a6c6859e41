#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! Terminal input arrives as crossterm events and is normalized here so
//! models never depend on the backend. Mouse events also carry the
//! [`HitId`] under the pointer, resolved by the runtime against the last
//! rendered frame.

use bitflags::bitflags;
use crossterm::event as ct;
use tally_render::HitId;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize { width: u16, height: u16 },
    /// Focus gained (`true`) or lost.
    Focus(bool),
    /// Periodic tick, delivered at the rate requested with `Cmd::Tick`.
    Tick,
}

impl Event {
    /// Convert a crossterm event. Returns `None` for events Tally ignores
    /// (pastes, key releases, unsupported keys).
    #[must_use]
    pub fn from_crossterm(event: ct::Event) -> Option<Self> {
        match event {
            ct::Event::Key(key) => KeyEvent::from_crossterm(key).map(Self::Key),
            ct::Event::Mouse(mouse) => Some(Self::Mouse(MouseEvent::from_crossterm(mouse))),
            ct::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            ct::Event::FocusGained => Some(Self::Focus(true)),
            ct::Event::FocusLost => Some(Self::Focus(false)),
            ct::Event::Paste(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    fn from_crossterm(key: ct::KeyEvent) -> Option<Self> {
        let code = match key.code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Esc => KeyCode::Escape,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => KeyCode::BackTab,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::PageUp => KeyCode::PageUp,
            ct::KeyCode::PageDown => KeyCode::PageDown,
            ct::KeyCode::Delete => KeyCode::Delete,
            ct::KeyCode::F(n) => KeyCode::F(n),
            _ => return None,
        };
        let kind = match key.kind {
            ct::KeyEventKind::Press => KeyEventKind::Press,
            ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
            ct::KeyEventKind::Release => KeyEventKind::Release,
        };
        Some(Self {
            code,
            modifiers: Modifiers::from_crossterm(key.modifiers),
            kind,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    F(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

impl Modifiers {
    fn from_crossterm(mods: ct::KeyModifiers) -> Self {
        let mut out = Self::NONE;
        if mods.contains(ct::KeyModifiers::SHIFT) {
            out |= Self::SHIFT;
        }
        if mods.contains(ct::KeyModifiers::ALT) {
            out |= Self::ALT;
        }
        if mods.contains(ct::KeyModifiers::CONTROL) {
            out |= Self::CTRL;
        }
        if mods.intersects(ct::KeyModifiers::SUPER | ct::KeyModifiers::META) {
            out |= Self::SUPER;
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
    /// Region under the pointer in the last rendered frame.
    pub hit: Option<HitId>,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
            hit: None,
        }
    }

    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    fn from_crossterm(mouse: ct::MouseEvent) -> Self {
        let button = |b: ct::MouseButton| match b {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        };
        let kind = match mouse.kind {
            ct::MouseEventKind::Down(b) => MouseEventKind::Down(button(b)),
            ct::MouseEventKind::Up(b) => MouseEventKind::Up(button(b)),
            ct::MouseEventKind::Drag(b) => MouseEventKind::Drag(button(b)),
            ct::MouseEventKind::Moved => MouseEventKind::Moved,
            ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            ct::MouseEventKind::ScrollLeft => MouseEventKind::ScrollLeft,
            ct::MouseEventKind::ScrollRight => MouseEventKind::ScrollRight,
        };
        Self {
            kind,
            x: mouse.column,
            y: mouse.row,
            modifiers: Modifiers::from_crossterm(mouse.modifiers),
            hit: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    Moved,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
