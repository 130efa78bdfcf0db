#![forbid(unsafe_code)]

//! Terminal lifecycle guard.
//!
//! [`TerminalSession`] enters raw mode and optionally the alternate screen
//! and mouse capture, and undoes everything it enabled when dropped. The
//! drop path runs on early returns and errors too, so the user's shell is
//! never left in raw mode.
//!
//! # Example
//!
//! ```no_run
//! use folio_core::terminal_session::{SessionOptions, TerminalSession};
//!
//! fn run() -> std::io::Result<()> {
//!     let session = TerminalSession::new(SessionOptions::default())?;
//!     while let Some(event) = session.next_event(std::time::Duration::from_millis(50))? {
//!         let _ = event;
//!     }
//!     Ok(())
//! }
//! ```

use std::io::{self, Write};
use std::time::Duration;

use crate::event::Event;

/// Which terminal features to enable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Switch to the alternate screen buffer.
    pub alternate_screen: bool,
    /// Report mouse presses, drags, and wheel motion.
    pub mouse_capture: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: true,
        }
    }
}

/// RAII guard over the terminal's raw-mode state.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen_enabled: bool,
    mouse_enabled: bool,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested features.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or any requested feature cannot be
    /// enabled. Features enabled before the failure are rolled back.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");

        let mut session = Self {
            alternate_screen_enabled: false,
            mouse_enabled: false,
        };

        let mut stdout = io::stdout();
        if options.alternate_screen {
            crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
            session.alternate_screen_enabled = true;
            tracing::info!("alternate screen enabled");
        }
        if options.mouse_capture {
            crossterm::execute!(stdout, crossterm::event::EnableMouseCapture)?;
            session.mouse_enabled = true;
            tracing::info!("mouse capture enabled");
        }
        crossterm::execute!(stdout, crossterm::cursor::Hide)?;

        Ok(session)
    }

    /// Current terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Wait up to `timeout` for an input event.
    ///
    /// Returns `Ok(None)` on timeout or when the backend event has no Folio
    /// equivalent.
    pub fn next_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }
        let raw = crossterm::event::read()?;
        Ok(Event::from_crossterm(raw))
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
            self.mouse_enabled = false;
        }
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
        }
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = stdout.flush();
        tracing::info!("terminal restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}
