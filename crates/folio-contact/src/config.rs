#![forbid(unsafe_code)]

//! EmailJS delivery settings.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `FOLIO_EMAILJS_SERVICE_ID` | EmailJS service id |
//! | `FOLIO_EMAILJS_TEMPLATE_ID` | EmailJS template id |
//! | `FOLIO_EMAILJS_PUBLIC_KEY` | Account public key (sent as `user_id`) |
//! | `FOLIO_CONTACT_TO` | Recipient address passed to the template |
//!
//! All four are required. Resolution happens at submit time, so a missing
//! value shows up as a failed submission rather than a startup error.

use crate::error::ConfigError;

/// Env var holding the EmailJS service id.
pub const SERVICE_ID_VAR: &str = "FOLIO_EMAILJS_SERVICE_ID";
/// Env var holding the EmailJS template id.
pub const TEMPLATE_ID_VAR: &str = "FOLIO_EMAILJS_TEMPLATE_ID";
/// Env var holding the EmailJS public key.
pub const PUBLIC_KEY_VAR: &str = "FOLIO_EMAILJS_PUBLIC_KEY";
/// Env var holding the recipient address.
pub const RECIPIENT_VAR: &str = "FOLIO_CONTACT_TO";

/// Resolved EmailJS settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub to_email: String,
}

impl EmailJsConfig {
    /// Read the settings from the process environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] naming the first unset or blank variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the settings through an arbitrary lookup.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] naming the first unset or blank variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(var))
        };
        Ok(Self {
            service_id: require(SERVICE_ID_VAR)?,
            template_id: require(TEMPLATE_ID_VAR)?,
            public_key: require(PUBLIC_KEY_VAR)?,
            to_email: require(RECIPIENT_VAR)?,
        })
    }
}
