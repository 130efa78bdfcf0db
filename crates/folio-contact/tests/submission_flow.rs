#![forbid(unsafe_code)]

//! End-to-end submission flow against in-memory senders.
//!
//! 1. Missing delivery settings fail fast with an error banner and never
//!    reach the sender.
//! 2. A refused send keeps the form contents and shows an error banner.
//! 3. The banner is visible for 5000 ms, fades until 5300 ms, then clears.
//! 4. No automatic retry: one submit is one send attempt.
//! 5. Any value without exactly one `@` fails email validation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use folio_contact::{
    BannerKind, BannerStage, ConfigError, ContactError, ContactForm, EmailJsConfig, EmailSender,
    Field, FieldProblem, Outcome, SendError, SendRequest, Submission,
};
use folio_core::{Duration, Instant};
use proptest::prelude::*;

#[derive(Clone, Default)]
struct Counting {
    calls: Arc<AtomicUsize>,
    status: Option<u16>,
}

impl EmailSender for Counting {
    fn send(&self, _request: &SendRequest) -> Result<(), SendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.status {
            None => Ok(()),
            Some(status) => Err(SendError::Rejected {
                status,
                body: "Bad Request".into(),
            }),
        }
    }
}

fn good_config() -> Result<EmailJsConfig, ConfigError> {
    Ok(EmailJsConfig {
        service_id: "service".into(),
        template_id: "template".into(),
        public_key: "key".into(),
        to_email: "owner@example.com".into(),
    })
}

fn filled() -> ContactForm {
    ContactForm::new()
        .name("Linus")
        .email("linus@example.org")
        .subject("Kernel")
        .message("Just a hobby, won't be big.")
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn missing_config_shows_error_without_sending() {
    let sender = Counting::default();
    let calls = Arc::clone(&sender.calls);
    let mut flow = Submission::with_config(
        sender,
        Box::new(|| Err(ConfigError::Missing("FOLIO_EMAILJS_PUBLIC_KEY"))),
    );
    *flow.form_mut() = filled();

    let t0 = Instant::now();
    let err = flow.submit(t0).unwrap_err();
    assert!(matches!(
        err,
        ContactError::Config(ConfigError::Missing("FOLIO_EMAILJS_PUBLIC_KEY"))
    ));
    assert!(!flow.is_submitting());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        flow.banner().current(),
        Some((BannerKind::Error, BannerStage::Visible))
    );
    assert_eq!(flow.form(), &filled());
}

#[test]
fn rejected_send_keeps_form() {
    let sender = Counting {
        status: Some(400),
        ..Counting::default()
    };
    let calls = Arc::clone(&sender.calls);
    let mut flow = Submission::with_config(sender, Box::new(good_config));
    *flow.form_mut() = filled();

    let t0 = Instant::now();
    flow.submit(t0).unwrap();
    let outcome = flow.wait(Duration::from_secs(5), t0).expect("worker result");
    match outcome {
        Outcome::Failed(ContactError::Send(SendError::Rejected { status, .. })) => {
            assert_eq!(status, 400);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(flow.form(), &filled());
    assert_eq!(
        flow.banner().current(),
        Some((BannerKind::Error, BannerStage::Visible))
    );

    // Nothing retries behind the caller's back.
    for step in 1..=10 {
        flow.poll(t0 + ms(step * 1000));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn banner_lifecycle_after_success() {
    let mut flow = Submission::with_config(Counting::default(), Box::new(good_config));
    *flow.form_mut() = filled();

    let t0 = Instant::now();
    flow.submit(t0).unwrap();
    assert!(matches!(flow.wait(Duration::from_secs(5), t0), Some(Outcome::Sent)));
    assert!(flow.form().is_blank());

    flow.poll(t0 + ms(4999));
    assert_eq!(
        flow.banner().current(),
        Some((BannerKind::Success, BannerStage::Visible))
    );
    flow.poll(t0 + ms(5000));
    assert_eq!(
        flow.banner().current(),
        Some((BannerKind::Success, BannerStage::Fading))
    );
    flow.poll(t0 + ms(5300));
    assert_eq!(flow.banner().current(), None);
    assert_eq!(flow.next_wake(), None);
}

#[test]
fn resubmitting_replaces_banner() {
    let mut flow = Submission::with_config(
        Counting::default(),
        Box::new(|| Err(ConfigError::Missing("FOLIO_CONTACT_TO"))),
    );
    *flow.form_mut() = filled();
    let t0 = Instant::now();
    let _ = flow.submit(t0);
    let _ = flow.submit(t0 + ms(4000));
    flow.poll(t0 + ms(5000));
    assert_eq!(
        flow.banner().current(),
        Some((BannerKind::Error, BannerStage::Visible))
    );
}

proptest! {
    #[test]
    fn email_without_single_at_is_rejected(local in "[a-z]{1,8}", domain in "[a-z]{1,8}\\.[a-z]{2,4}", ats in 0usize..4) {
        prop_assume!(ats != 1);
        let email = match ats {
            0 => format!("{local}{domain}"),
            n => format!("{local}{}{domain}", "@".repeat(n)),
        };
        let form = filled().email(email);
        let errors = form.validate();
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors[0].field, Field::Email);
        prop_assert_eq!(errors[0].problem, FieldProblem::InvalidEmail);
    }

    #[test]
    fn well_formed_email_passes(local in "[a-z0-9._]{1,12}", host in "[a-z0-9]{1,10}", tld in "[a-z]{2,6}") {
        let form = filled().email(format!("{local}@{host}.{tld}"));
        prop_assert!(form.validate().is_empty());
    }
}
