#![forbid(unsafe_code)]

//! Contact form for the Folio site: field validation, EmailJS delivery on a
//! worker thread, and an auto-dismissing status banner.

pub mod banner;
pub mod config;
pub mod error;
pub mod form;
pub mod sender;
pub mod submission;

pub use banner::{BannerKind, BannerStage, StatusBanner};
pub use config::EmailJsConfig;
pub use error::{ConfigError, ContactError, SendError};
pub use form::{ContactForm, Field, FieldError, FieldProblem};
pub use sender::{EmailJsSender, EmailSender, SendRequest, TemplateParams};
pub use submission::{ConfigSource, Outcome, Submission};
