#![forbid(unsafe_code)]

//! `folio` binary entry point.

use folio_core::logging::{self, LogConfig};
use folio_demo::{app, cli};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init(&LogConfig::from_env()) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = app::run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
