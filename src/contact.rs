//! Contact form validation and submission.
//!
//! Submissions are checked with [`Validation`] so every problem is known at
//! once; the visitor sees the first one in the notification toast. Nothing
//! is sent anywhere: a valid submission is acknowledged and the form is
//! cleared.

use crate::config::Selectors;
use crate::host::{Document, ElementId};
use crate::notify::{NotificationKind, Toaster};
use crate::timers::TaskQueue;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please fill in all fields.")]
    MissingFields { fields: Vec<&'static str> },

    #[error("Please enter a valid email address.")]
    InvalidEmail { email: String },
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Field values of one submission, exactly as typed.
///
/// A field is missing only when it is empty; surrounding whitespace is kept
/// and counts against the email shape check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    /// Check every field, accumulating all failures.
    ///
    /// An empty email only counts as missing; the shape check applies to
    /// non-empty addresses.
    ///
    /// ```rust
    /// use vitrine::contact::{ContactError, ContactSubmission};
    /// use stillwater::validation::Validation;
    ///
    /// let ok = ContactSubmission::new("Jo", "jo@x.co", "Hi", "Hello");
    /// assert!(matches!(ok.validate(), Validation::Success(_)));
    ///
    /// let bad = ContactSubmission::new("Jo", "jo@x", "", "Hello");
    /// match bad.validate() {
    ///     Validation::Failure(errors) => assert_eq!(errors.len(), 2),
    ///     Validation::Success(_) => unreachable!(),
    /// }
    /// ```
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ContactError>> {
        let missing: Vec<&'static str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        let checks = vec![
            if missing.is_empty() {
                Validation::success(())
            } else {
                Validation::fail(ContactError::MissingFields { fields: missing })
            },
            if self.email.is_empty() || email_pattern().is_match(&self.email) {
                Validation::success(())
            } else {
                Validation::fail(ContactError::InvalidEmail {
                    email: self.email.clone(),
                })
            },
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Acknowledgement shown after a valid submission. The name is trimmed
    /// for display only.
    pub fn acknowledgement(&self) -> String {
        format!(
            "Thank you for your message, {}! I will get back to you soon at {}.",
            self.name.trim(),
            self.email
        )
    }
}

/// Result of a submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent(ContactSubmission),
    Rejected(Vec<ContactError>),
}

/// The form and its four required fields.
#[derive(Clone, Debug)]
pub struct ContactForm {
    form: ElementId,
    name: ElementId,
    email: ElementId,
    subject: ElementId,
    message: ElementId,
}

impl ContactForm {
    /// Capture the form. Every field must be present.
    pub fn capture(document: &dyn Document, selectors: &Selectors) -> Option<Self> {
        Some(Self {
            form: document.query(&selectors.contact_form)?,
            name: document.query(&selectors.contact_name)?,
            email: document.query(&selectors.contact_email)?,
            subject: document.query(&selectors.contact_subject)?,
            message: document.query(&selectors.contact_message)?,
        })
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    fn fields(&self) -> [ElementId; 4] {
        [self.name, self.email, self.subject, self.message]
    }

    pub fn read(&self, document: &dyn Document) -> ContactSubmission {
        let [name, email, subject, message] =
            self.fields().map(|field| document.value(field).unwrap_or_default());
        ContactSubmission::new(&name, &email, &subject, &message)
    }

    /// Validate the current field values and report through `toaster`.
    ///
    /// On success the fields are cleared; on failure they are left as typed.
    pub fn submit(
        &self,
        document: &mut dyn Document,
        toaster: &mut Toaster,
        tasks: &mut TaskQueue,
        now_ms: u64,
    ) -> SubmitOutcome {
        let submission = self.read(&*document);
        match submission.validate() {
            Validation::Success(()) => {
                toaster.notify(
                    document,
                    tasks,
                    now_ms,
                    &submission.acknowledgement(),
                    NotificationKind::Success,
                );
                for field in self.fields() {
                    if let Err(err) = document.set_value(field, "") {
                        tracing::debug!(element = %field, error = %err, "field not cleared");
                    }
                }
                tracing::info!(name = %submission.name, "contact form accepted");
                SubmitOutcome::Sent(submission)
            }
            Validation::Failure(errors) => {
                let errors: Vec<ContactError> = errors.iter().cloned().collect();
                if let Some(first) = errors.first() {
                    toaster.notify(document, tasks, now_ms, &first.to_string(), NotificationKind::Error);
                }
                tracing::debug!(count = errors.len(), "contact form rejected");
                SubmitOutcome::Rejected(errors)
            }
        }
    }
}
