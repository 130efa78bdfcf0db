#![forbid(unsafe_code)]

//! The contact form: four required text fields.

use std::fmt;

/// One form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    /// All fields in tab order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Lower-case label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    /// Next field in tab order, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Subject,
            Field::Subject => Field::Message,
            Field::Message => Field::Name,
        }
    }

    /// Previous field in tab order, wrapping.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Subject => Field::Email,
            Field::Message => Field::Subject,
        }
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    /// Blank after trimming.
    Empty,
    /// Not shaped like `local@domain.tld`.
    InvalidEmail,
}

/// A validation failure on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Field that failed.
    pub field: Field,
    /// What is wrong with it.
    pub problem: FieldProblem,
}

impl FieldError {
    #[must_use]
    pub const fn new(field: Field, problem: FieldProblem) -> Self {
        Self { field, problem }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            FieldProblem::Empty => write!(f, "{} is required", self.field.label()),
            FieldProblem::InvalidEmail => {
                write!(f, "{} is not a valid address", self.field.label())
            }
        }
    }
}

/// Contact form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Sender's name.
    pub name: String,
    /// Sender's address; must look like `local@domain.tld`.
    pub email: String,
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender's name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the reply address.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the subject line.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the message body.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Contents of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Mutable contents of `field`, for text editing.
    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether every field is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).trim().is_empty())
    }

    /// Check every field, in tab order.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for field in Field::ALL {
            let value = self.get(field).trim();
            if value.is_empty() {
                errors.push(FieldError::new(field, FieldProblem::Empty));
            } else if field == Field::Email && !is_plausible_email(value) {
                errors.push(FieldError::new(field, FieldProblem::InvalidEmail));
            }
        }
        errors
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
