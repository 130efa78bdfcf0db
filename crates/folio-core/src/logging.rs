#![forbid(unsafe_code)]

//! Logging setup.
//!
//! The terminal UI owns stdout, so log output goes to a file. Logging is off
//! unless `FOLIO_LOG_FILE` names a destination.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `FOLIO_LOG_FILE` | Path of the log file | unset (logging disabled) |
//! | `FOLIO_LOG` | `EnvFilter` directive | `info` |
//!
//! With the `tracing-json` feature the file receives one JSON object per
//! event instead of human-readable lines.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Default filter directive when `FOLIO_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log file path. `None` disables logging.
    pub file: Option<PathBuf>,
    /// `EnvFilter` directive.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl LogConfig {
    /// Read `FOLIO_LOG_FILE` and `FOLIO_LOG`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a closure).
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let file = lookup("FOLIO_LOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let filter = lookup("FOLIO_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        Self { file, filter }
    }
}

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(false)` when logging is disabled. A second call after a
/// subscriber is already installed is reported as an error.
pub fn init(config: &LogConfig) -> io::Result<bool> {
    let Some(path) = config.file.as_ref() else {
        return Ok(false);
    };

    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let file = open_log_file(path)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    #[cfg(feature = "tracing-json")]
    let result = builder.json().try_init();
    #[cfg(not(feature = "tracing-json"))]
    let result = builder.try_init();

    result.map_err(|e| io::Error::other(e.to_string()))?;
    tracing::info!(path = %path.display(), filter = %config.filter, "logging initialised");
    Ok(true)
}

fn open_log_file(path: &std::path::Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn disabled_without_file() {
        let config = LogConfig::from_lookup(lookup(&[("FOLIO_LOG", "debug")]));
        assert_eq!(config.file, None);
        assert_eq!(config.filter, "debug");
        assert!(!init(&config).expect("disabled init is not an error"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = LogConfig::from_lookup(lookup(&[("FOLIO_LOG_FILE", "  "), ("FOLIO_LOG", "")]));
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn file_and_filter_are_read() {
        let config = LogConfig::from_lookup(lookup(&[
            ("FOLIO_LOG_FILE", "/tmp/folio.log"),
            ("FOLIO_LOG", "folio_carousel=trace"),
        ]));
        assert_eq!(config.file, Some(PathBuf::from("/tmp/folio.log")));
        assert_eq!(config.filter, "folio_carousel=trace");
    }

    #[test]
    fn invalid_filter_is_rejected() {
        let config = LogConfig {
            file: Some(std::env::temp_dir().join("folio-invalid-filter.log")),
            filter: "folio=verbose".to_string(),
        };
        let err = init(&config).expect_err("bad directive");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
