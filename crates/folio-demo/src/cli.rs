#![forbid(unsafe_code)]

//! Command-line argument parsing for the `folio` binary.
//!
//! Arguments are parsed by hand. Environment variables with the `FOLIO_`
//! prefix supply defaults; explicit flags win.

use std::env;
use std::path::PathBuf;
use std::process;

use crate::app::Screen;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Folio: testimonial carousel and contact form in the terminal

USAGE:
    folio [OPTIONS]

OPTIONS:
    --screen=NAME        Start screen: 'carousel' (default) or 'contact'
    --items=PATH         Load testimonials from a JSON file
    --no-mouse           Disable mouse event capture
    --exit-after-ms=N    Quit after N milliseconds (0 = never)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Tab              Switch between carousel and contact form
    Left / Right     Previous / next testimonial
    Up / Down        Move between form fields
    Enter            Send the contact form
    q / Ctrl+C       Quit (q only on the carousel screen)

MOUSE:
    Drag the strip to scroll, use the wheel to nudge it, click a dot to jump.

ENVIRONMENT VARIABLES:
    FOLIO_SCREEN                Override --screen
    FOLIO_ITEMS                 Override --items
    FOLIO_EXIT_AFTER_MS         Override --exit-after-ms
    FOLIO_LOG_FILE              Write logs to this file
    FOLIO_LOG                   Log filter directive (default: info)
    FOLIO_EMAILJS_SERVICE_ID    EmailJS service id
    FOLIO_EMAILJS_TEMPLATE_ID   EmailJS template id
    FOLIO_EMAILJS_PUBLIC_KEY    EmailJS public key
    FOLIO_CONTACT_TO            Recipient address for contact messages";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Screen shown at startup.
    pub screen: Screen,
    /// Testimonials file; `None` uses the bundled sample.
    pub items: Option<PathBuf>,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            screen: Screen::Carousel,
            items: None,
            mouse: true,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version`, or a bad argument.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match parse_args(&args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("folio {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }
}

/// Parse `args` with `lookup` supplying environment defaults.
///
/// # Errors
///
/// A message naming the offending argument.
pub fn parse_args(
    args: &[String],
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Command, String> {
    let mut opts = Opts::default();

    // Environment first; unparseable values are ignored.
    if let Some(val) = lookup("FOLIO_SCREEN")
        && let Some(screen) = Screen::parse(&val)
    {
        opts.screen = screen;
    }
    if let Some(val) = lookup("FOLIO_ITEMS")
        && !val.trim().is_empty()
    {
        opts.items = Some(PathBuf::from(val));
    }
    if let Some(val) = lookup("FOLIO_EXIT_AFTER_MS")
        && let Ok(n) = val.parse()
    {
        opts.exit_after_ms = n;
    }

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--no-mouse" => opts.mouse = false,
            other => {
                if let Some(val) = other.strip_prefix("--screen=") {
                    opts.screen =
                        Screen::parse(val).ok_or_else(|| format!("Invalid --screen value: {val}"))?;
                } else if let Some(val) = other.strip_prefix("--items=") {
                    opts.items = Some(PathBuf::from(val));
                } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                    opts.exit_after_ms = val
                        .parse()
                        .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                } else {
                    return Err(format!("Unknown argument: {other}"));
                }
            }
        }
    }

    Ok(Command::Run(opts))
}
