#![forbid(unsafe_code)]

//! Error types for the contact form.

use std::fmt;

use crate::form::FieldError;

/// Delivery settings could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or blank.
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(var) => write!(f, "email delivery is not configured: {var} is not set"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A send attempt failed.
#[derive(Debug)]
pub enum SendError {
    /// The service answered with a non-success status.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, if it could be read.
        body: String,
    },
    /// The request never got an answer (DNS, TLS, timeout, ...).
    Transport(String),
    /// The request body could not be encoded.
    Encode(serde_json::Error),
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status, body } if body.is_empty() => {
                write!(f, "email service rejected the message ({status})")
            }
            Self::Rejected { status, body } => {
                write!(f, "email service rejected the message ({status}): {body}")
            }
            Self::Transport(msg) => write!(f, "email service unreachable: {msg}"),
            Self::Encode(e) => write!(f, "failed to encode message: {e}"),
        }
    }
}

impl std::error::Error for SendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SendError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

/// Why a submission did not go out or did not succeed.
#[derive(Debug)]
pub enum ContactError {
    /// One or more fields failed validation.
    Invalid(Vec<FieldError>),
    /// Delivery settings are incomplete.
    Config(ConfigError),
    /// The send itself failed.
    Send(SendError),
    /// A previous submission is still in flight.
    Busy,
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => {
                write!(f, "form is incomplete")?;
                for (i, e) in errors.iter().enumerate() {
                    write!(f, "{}{e}", if i == 0 { ": " } else { "; " })?;
                }
                Ok(())
            }
            Self::Config(e) => write!(f, "{e}"),
            Self::Send(e) => write!(f, "{e}"),
            Self::Busy => write!(f, "a message is already being sent"),
        }
    }
}

impl std::error::Error for ContactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Send(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for ContactError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SendError> for ContactError {
    fn from(e: SendError) -> Self {
        Self::Send(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Field, FieldProblem};
    use std::error::Error;

    #[test]
    fn missing_config_names_variable() {
        let e = ConfigError::Missing("FOLIO_EMAILJS_SERVICE_ID");
        assert!(e.to_string().contains("FOLIO_EMAILJS_SERVICE_ID"));
    }

    #[test]
    fn rejected_includes_status() {
        let e = SendError::Rejected {
            status: 400,
            body: "The public key is required".into(),
        };
        assert_eq!(
            e.to_string(),
            "email service rejected the message (400): The public key is required"
        );
        let bare = SendError::Rejected {
            status: 503,
            body: String::new(),
        };
        assert_eq!(bare.to_string(), "email service rejected the message (503)");
    }

    #[test]
    fn invalid_lists_fields() {
        let e = ContactError::Invalid(vec![
            FieldError::new(Field::Name, FieldProblem::Empty),
            FieldError::new(Field::Email, FieldProblem::InvalidEmail),
        ]);
        assert_eq!(
            e.to_string(),
            "form is incomplete: name is required; email is not a valid address"
        );
    }

    #[test]
    fn sources_chain() {
        let e = ContactError::from(ConfigError::Missing("X"));
        assert!(e.source().is_some());
        assert!(ContactError::Busy.source().is_none());
    }
}
