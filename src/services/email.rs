//! # Email Composition
//!
//! Turns a recipient and a verification code into the [`EmailMessage`] that
//! is handed to the delivery queue. Composition is pure: the same inputs
//! always give the same message.

use tracing::{instrument, warn};

use crate::error::{VerificationError, VerificationResult};
use crate::models::EmailMessage;
use crate::utils::constant::EMAIL_SUBJECT_PREFIX;
use crate::utils::html::{generate_verification_email_html, generate_verification_email_text};

#[derive(Debug, Default, Clone, Copy)]
pub struct EmailComposer;

impl EmailComposer {
    /// Builds the verification email for `email` carrying `code`.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::Composition`] if either input is empty.
    #[instrument(skip(self, code))]
    pub fn compose(&self, email: &str, code: &str) -> VerificationResult<EmailMessage> {
        if email.is_empty() {
            warn!("Refusing to compose email without recipient");
            return Err(VerificationError::Composition("recipient email is empty"));
        }
        if code.is_empty() {
            warn!("Refusing to compose email without code");
            return Err(VerificationError::Composition("verification code is empty"));
        }

        Ok(EmailMessage {
            to: email.to_string(),
            subject: format!("{EMAIL_SUBJECT_PREFIX}: {code}"),
            html_body: generate_verification_email_html(email, code),
            plain_text_body: generate_verification_email_text(code),
        })
    }
}
