#![forbid(unsafe_code)]

//! Email delivery.
//!
//! [`EmailSender`] is the seam between the submission flow and the network.
//! [`EmailJsSender`] talks to the EmailJS REST endpoint; tests substitute an
//! in-memory sender.

use std::time::Duration;

use serde::Serialize;

use crate::config::EmailJsConfig;
use crate::error::SendError;
use crate::form::ContactForm;

/// EmailJS send endpoint.
pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Template variables passed to the email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    /// Visitor's name.
    pub from_name: String,
    /// Visitor's reply-to address.
    pub from_email: String,
    pub subject: String,
    pub message: String,
    /// Site owner's inbox.
    pub to_email: String,
}

impl TemplateParams {
    /// Build from a form, trimming each field.
    #[must_use]
    pub fn from_form(form: &ContactForm, to_email: &str) -> Self {
        Self {
            from_name: form.name.trim().to_string(),
            from_email: form.email.trim().to_string(),
            subject: form.subject.trim().to_string(),
            message: form.message.trim().to_string(),
            to_email: to_email.to_string(),
        }
    }
}

/// Everything needed for one send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    /// EmailJS service the message goes through.
    pub service_id: String,
    /// EmailJS template rendered with `params`.
    pub template_id: String,
    pub params: TemplateParams,
    /// Account public key, sent as `user_id`.
    pub public_key: String,
}

impl SendRequest {
    /// Combine a form with delivery settings.
    #[must_use]
    pub fn new(form: &ContactForm, config: &EmailJsConfig) -> Self {
        Self {
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            params: TemplateParams::from_form(form, &config.to_email),
            public_key: config.public_key.clone(),
        }
    }
}

/// Delivers a [`SendRequest`].
///
/// Implementations block until the message is accepted or refused; callers
/// run them off the UI thread.
pub trait EmailSender: Send + Sync {
    /// Send one message.
    ///
    /// # Errors
    ///
    /// [`SendError`] when the message was not accepted.
    fn send(&self, request: &SendRequest) -> Result<(), SendError>;
}

#[derive(Serialize)]
struct EmailJsBody<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// Encode a request as the EmailJS JSON body.
///
/// # Errors
///
/// [`SendError::Encode`] if serialization fails.
pub fn encode_body(request: &SendRequest) -> Result<String, SendError> {
    let body = EmailJsBody {
        service_id: &request.service_id,
        template_id: &request.template_id,
        user_id: &request.public_key,
        template_params: &request.params,
    };
    Ok(serde_json::to_string(&body)?)
}

/// Sends through the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsSender {
    agent: ureq::Agent,
    endpoint: String,
}

impl Default for EmailJsSender {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailJsSender {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// Sender for the public EmailJS endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(EMAILJS_ENDPOINT, Self::DEFAULT_TIMEOUT)
    }

    /// Sender for a custom endpoint (self-hosted proxy, local test server).
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl EmailSender for EmailJsSender {
    fn send(&self, request: &SendRequest) -> Result<(), SendError> {
        let body = encode_body(request)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            service_id = %request.service_id,
            template_id = %request.template_id,
            "sending contact message"
        );

        let result = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_string(&body);

        match result {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(SendError::Rejected { status, body })
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(SendError::Transport(transport.to_string()))
            }
        }
    }
}
