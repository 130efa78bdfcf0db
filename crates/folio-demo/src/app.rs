#![forbid(unsafe_code)]

//! Application model and the terminal event loop.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use folio_carousel::Testimonial;
use folio_carousel::item::{load_items, read_items};
use folio_contact::{EmailJsSender, Submission};
use folio_core::event::{Event, KeyCode, KeyEvent};
use folio_core::terminal_session::{SessionOptions, TerminalSession};
use folio_core::{Duration, Instant};

use crate::canvas::{Canvas, Style};
use crate::cli::Opts;
use crate::screens::carousel::CarouselScreen;
use crate::screens::contact::ContactScreen;

/// Testimonials bundled with the binary.
pub const SAMPLE_ITEMS: &str = include_str!("../data/testimonials.json");

/// Frame interval while something is animating.
const FRAME: Duration = Duration::from_millis(16);
/// Longest idle wait between input polls.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Carousel,
    Contact,
}

impl Screen {
    /// Parse a screen name (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "carousel" | "testimonials" => Some(Screen::Carousel),
            "contact" => Some(Screen::Contact),
            _ => None,
        }
    }

    /// The other screen.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Screen::Carousel => Screen::Contact,
            Screen::Contact => Screen::Carousel,
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Screen::Carousel => "Testimonials",
            Screen::Contact => "Contact",
        }
    }
}

/// Load testimonials from `path`, or the bundled sample when `None`.
///
/// # Errors
///
/// Open failures and malformed data, as [`io::Error`].
pub fn load(path: Option<&Path>) -> io::Result<Vec<Testimonial>> {
    let items = match path {
        Some(path) => read_items(File::open(path)?),
        None => load_items(SAMPLE_ITEMS),
    };
    items.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Everything the demo shows.
#[derive(Debug)]
pub struct App {
    screen: Screen,
    carousel: CarouselScreen,
    contact: ContactScreen<EmailJsSender>,
    quit: bool,
    exit_at: Option<Instant>,
}

impl App {
    /// Build the model for a `cols`-wide terminal.
    ///
    /// # Errors
    ///
    /// Fails if the carousel configuration derived from `cols` is invalid.
    pub fn new(opts: &Opts, items: Vec<Testimonial>, cols: u16, now: Instant) -> io::Result<Self> {
        let carousel = CarouselScreen::new(items, cols).map_err(invalid_input)?;
        let contact = ContactScreen::new(Submission::new(EmailJsSender::new()));
        let exit_at =
            (opts.exit_after_ms > 0).then(|| now + Duration::from_millis(opts.exit_after_ms));
        Ok(Self {
            screen: opts.screen,
            carousel,
            contact,
            quit: false,
            exit_at,
        })
    }

    /// Screen in front.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The carousel screen.
    #[must_use]
    pub fn carousel(&self) -> &CarouselScreen {
        &self.carousel
    }

    /// Whether the loop should stop.
    #[must_use]
    pub fn should_quit(&self, now: Instant) -> bool {
        self.quit || self.exit_at.is_some_and(|at| now >= at)
    }

    /// Apply one input event. Returns `true` if a redraw is needed.
    ///
    /// # Errors
    ///
    /// Fails if a resize produces an invalid carousel configuration.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> io::Result<bool> {
        match event {
            Event::Key(key) if key.is_actionable() => Ok(self.handle_key(*key, now)),
            Event::Key(_) => Ok(false),
            Event::Pointer(pointer) => Ok(match self.screen {
                Screen::Carousel => self.carousel.handle_pointer(*pointer),
                Screen::Contact => false,
            }),
            Event::Resize { cols, .. } => {
                self.carousel.resize(*cols).map_err(invalid_input)?;
                Ok(true)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.ctrl() && key.is_char('c') {
            self.quit = true;
            return true;
        }
        if key.code == KeyCode::Tab {
            self.screen = self.screen.next();
            tracing::debug!(screen = self.screen.title(), "screen switched");
            return true;
        }
        match self.screen {
            Screen::Carousel if key.is_char('q') => {
                self.quit = true;
                true
            }
            Screen::Carousel => self.carousel.handle_key(key),
            Screen::Contact => self.contact.handle_key(key, now),
        }
    }

    /// Drive timers on both screens. Returns `true` if a redraw is needed.
    ///
    /// The carousel keeps running while the contact form is in front so the
    /// strip is where the visitor left it, give or take autoplay.
    pub fn tick(&mut self, now: Instant) -> bool {
        let carousel = self.carousel.tick();
        let contact = self.contact.tick(now);
        match self.screen {
            Screen::Carousel => carousel,
            Screen::Contact => contact,
        }
    }

    /// How long to wait for input before the next tick.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        if self.contact.is_busy() {
            return FRAME;
        }
        let wake = [
            self.carousel.next_wake(),
            self.contact.next_wake(),
            self.exit_at,
        ]
        .into_iter()
        .flatten()
        .min();
        match wake {
            Some(at) => at.saturating_duration_since(now).clamp(FRAME, IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    /// Draw the front screen and the tab bar.
    pub fn render(&self, canvas: &mut Canvas) {
        match self.screen {
            Screen::Carousel => self.carousel.render(canvas),
            Screen::Contact => self.contact.render(canvas),
        }
        let bottom = i32::from(canvas.height()) - 1;
        let width = i32::from(canvas.width());
        let mut x = 1;
        for screen in [Screen::Carousel, Screen::Contact] {
            let style = if screen == self.screen {
                Style::PLAIN.bold()
            } else {
                Style::PLAIN.dim()
            };
            x = canvas.put_str(x, bottom, &format!(" {} ", screen.title()), style, width) + 1;
        }
        let hint = match self.screen {
            Screen::Carousel => "Tab switch  ←/→ browse  q quit",
            Screen::Contact => "Tab switch  ↑/↓ field  Enter send  Ctrl+C quit",
        };
        canvas.put_str(x + 2, bottom, hint, Style::PLAIN.dim(), width);
    }
}

fn invalid_input(e: impl std::error::Error + Send + Sync + 'static) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

/// Run the demo until the user quits.
///
/// # Errors
///
/// Terminal I/O failures and unreadable item files.
pub fn run(opts: &Opts) -> io::Result<()> {
    let items = load(opts.items.as_deref())?;
    tracing::info!(items = items.len(), screen = ?opts.screen, "folio starting");

    let session = TerminalSession::new(SessionOptions {
        mouse_capture: opts.mouse,
        ..SessionOptions::default()
    })?;
    let (cols, rows) = session.size()?;
    let mut app = App::new(opts, items, cols, Instant::now())?;
    let mut canvas = Canvas::new(cols, rows);
    let mut stdout = io::stdout();
    let mut dirty = true;

    loop {
        let now = Instant::now();
        dirty |= app.tick(now);
        if app.should_quit(now) {
            break;
        }
        if dirty {
            canvas.clear();
            app.render(&mut canvas);
            canvas.flush(&mut stdout)?;
            dirty = false;
        }

        if let Some(event) = session.next_event(app.poll_timeout(now))? {
            if let Event::Resize { cols, rows } = event {
                canvas.resize(cols, rows);
            }
            dirty |= app.handle_event(&event, Instant::now())?;
        }
    }

    stdout.flush()?;
    tracing::info!("folio exiting");
    Ok(())
}
