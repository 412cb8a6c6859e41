#![forbid(unsafe_code)]

//! RAII terminal session.
//!
//! Entering raw mode, the alternate screen, and mouse capture happens in
//! [`TerminalSession::new`]; `Drop` undoes exactly what was enabled, so
//! early returns and errors still leave the terminal usable. A panic hook
//! covers the paths where `Drop` never runs.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::{cursor, event, execute, terminal};
use tracing::{info, warn};
use web_time::Duration;

use crate::event::Event;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub alternate_screen: bool,
    pub mouse_capture: bool,
}

#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
}

impl TerminalSession {
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        let session = Self { options };
        let mut stdout = io::stdout();
        if options.alternate_screen {
            execute!(
                stdout,
                terminal::EnterAlternateScreen,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            )?;
        }
        if options.mouse_capture {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        execute!(stdout, cursor::Hide)?;
        info!(?options, "terminal session started");
        Ok(session)
    }

    /// Terminal size, never smaller than 2x2.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        let (w, h) = terminal::size()?;
        Ok((w.max(2), h.max(2)))
    }

    /// True when an event is ready within `timeout`.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    /// Read one event; `None` when it has no canonical form.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        Ok(Event::from_crossterm(event::read()?))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.options.mouse_capture {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        if self.options.alternate_screen {
            let _ = execute!(stdout, terminal::LeaveAlternateScreen);
        } else {
            let _ = execute!(stdout, crossterm::style::Print("\r\n"));
        }
        let _ = execute!(stdout, cursor::Show);
        if let Err(err) = terminal::disable_raw_mode() {
            warn!(%err, "failed to leave raw mode");
        }
        let _ = stdout.flush();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show
    );
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}
