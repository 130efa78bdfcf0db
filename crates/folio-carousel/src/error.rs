#![forbid(unsafe_code)]

//! Error types for item loading and carousel configuration.

use std::fmt;

/// Errors raised while loading the item data source.
#[derive(Debug)]
pub enum ItemError {
    /// The JSON document could not be parsed.
    Parse(serde_json::Error),
    /// Reading the data source failed.
    Io(std::io::Error),
    /// A rating fell outside 1–5.
    Rating(u8),
    /// Two records share an id.
    DuplicateId(String),
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemError::Parse(e) => write!(f, "invalid item data: {e}"),
            ItemError::Io(e) => write!(f, "I/O error: {e}"),
            ItemError::Rating(r) => write!(f, "rating {r} is outside 1-5"),
            ItemError::DuplicateId(id) => write!(f, "duplicate item id: {id}"),
        }
    }
}

impl std::error::Error for ItemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ItemError::Parse(e) => Some(e),
            ItemError::Io(e) => Some(e),
            ItemError::Rating(_) => None,
            ItemError::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for ItemError {
    fn from(e: serde_json::Error) -> Self {
        ItemError::Parse(e)
    }
}

impl From<std::io::Error> for ItemError {
    fn from(e: std::io::Error) -> Self {
        ItemError::Io(e)
    }
}

/// Rejected carousel configuration values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Copy count must be odd and at least [`MIN_COPIES`](crate::sequence::MIN_COPIES).
    Copies(usize),
    /// A geometry value was negative or not finite.
    Geometry {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A sensitivity multiplier was zero, negative, or not finite.
    Sensitivity {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A timer interval was zero.
    Interval(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Copies(k) => {
                write!(f, "copy count {k} must be odd and at least {}", crate::sequence::MIN_COPIES)
            }
            ConfigError::Geometry { field, value } => {
                write!(f, "{field} must be a finite non-negative number, got {value}")
            }
            ConfigError::Sensitivity { field, value } => {
                write!(f, "{field} must be a finite positive number, got {value}")
            }
            ConfigError::Interval(field) => write!(f, "{field} must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}
