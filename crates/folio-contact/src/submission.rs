#![forbid(unsafe_code)]

//! Submission flow: validate, send off-thread, report through the banner.
//!
//! The UI thread never blocks on the network. [`Submission::submit`] hands
//! the request to a worker thread and returns immediately; the host calls
//! [`Submission::poll`] from its frame loop to pick up the result.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;

use folio_core::{Duration, Instant};

use crate::banner::{BannerKind, StatusBanner};
use crate::config::EmailJsConfig;
use crate::error::{ConfigError, ContactError, SendError};
use crate::form::ContactForm;
use crate::sender::{EmailSender, SendRequest};

/// Where delivery settings come from at submit time.
pub type ConfigSource = Box<dyn Fn() -> Result<EmailJsConfig, ConfigError> + Send>;

/// Finished submission.
#[derive(Debug)]
pub enum Outcome {
    /// Accepted by the service; the form was cleared.
    Sent,
    /// Not sent or refused; the form is left as typed.
    Failed(ContactError),
}

/// Contact form plus its in-flight send and status banner.
pub struct Submission<S: EmailSender + 'static> {
    form: ContactForm,
    banner: StatusBanner,
    sender: Arc<S>,
    config: ConfigSource,
    pending: Option<Receiver<Result<(), SendError>>>,
}

impl<S: EmailSender + 'static> std::fmt::Debug for Submission<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Submission")
            .field("form", &self.form)
            .field("banner", &self.banner)
            .field("submitting", &self.is_submitting())
            .finish_non_exhaustive()
    }
}

impl<S: EmailSender + 'static> Submission<S> {
    /// Flow reading its settings from the environment on each submit.
    pub fn new(sender: S) -> Self {
        Self::with_config(sender, Box::new(EmailJsConfig::from_env))
    }

    /// Flow with an explicit settings source.
    pub fn with_config(sender: S, config: ConfigSource) -> Self {
        Self {
            form: ContactForm::default(),
            banner: StatusBanner::new(),
            sender: Arc::new(sender),
            config,
            pending: None,
        }
    }

    /// Form contents.
    #[must_use]
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Form contents for editing. Edits are ignored by an in-flight send.
    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// Status banner.
    #[must_use]
    pub fn banner(&self) -> &StatusBanner {
        &self.banner
    }

    /// Whether a send is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate and start sending.
    ///
    /// Validation failures return without touching the banner. A missing
    /// configuration fails the submission immediately with an error banner
    /// and never reaches the sender.
    ///
    /// # Errors
    ///
    /// [`ContactError::Busy`], [`ContactError::Invalid`], or
    /// [`ContactError::Config`].
    pub fn submit(&mut self, now: Instant) -> Result<(), ContactError> {
        if self.pending.is_some() {
            return Err(ContactError::Busy);
        }
        let errors = self.form.validate();
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "contact form rejected by validation");
            return Err(ContactError::Invalid(errors));
        }

        self.banner.dismiss();
        let config = match (self.config)() {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "contact submission failed");
                self.banner.show(BannerKind::Error, now);
                return Err(e.into());
            }
        };

        let request = SendRequest::new(&self.form, &config);
        let sender = Arc::clone(&self.sender);
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("folio-contact-send".into())
            .spawn(move || {
                let result = sender.send(&request);
                // The receiver may be gone if the UI shut down first.
                let _ = tx.send(result);
            });

        match spawned {
            Ok(_) => {
                tracing::info!("contact submission started");
                self.pending = Some(rx);
                Ok(())
            }
            Err(e) => {
                let e = ContactError::Send(SendError::Transport(e.to_string()));
                tracing::error!(error = %e, "contact submission failed");
                self.banner.show(BannerKind::Error, now);
                Err(e)
            }
        }
    }

    /// Apply a finished send, if any, and advance the banner.
    pub fn poll(&mut self, now: Instant) -> Option<Outcome> {
        self.banner.tick(now);
        let result = match self.pending.as_ref()?.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(worker_lost()),
        };
        Some(self.finish(result, now))
    }

    /// Block up to `timeout` for the in-flight send, then apply it.
    pub fn wait(&mut self, timeout: Duration, now: Instant) -> Option<Outcome> {
        let result = match self.pending.as_ref()?.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => Err(worker_lost()),
        };
        Some(self.finish(result, now))
    }

    /// Earliest instant `poll` has scheduled work.
    #[must_use]
    pub fn next_wake(&self) -> Option<Instant> {
        self.banner.next_change()
    }

    fn finish(&mut self, result: Result<(), SendError>, now: Instant) -> Outcome {
        self.pending = None;
        match result {
            Ok(()) => {
                tracing::info!("contact message sent");
                self.form.clear();
                self.banner.show(BannerKind::Success, now);
                Outcome::Sent
            }
            Err(e) => {
                tracing::error!(error = %e, "contact submission failed");
                self.banner.show(BannerKind::Error, now);
                Outcome::Failed(ContactError::Send(e))
            }
        }
    }
}

fn worker_lost() -> SendError {
    SendError::Transport("send worker exited without a result".into())
}
