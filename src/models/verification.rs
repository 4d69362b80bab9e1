use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use validator::Validate;

use crate::error::{VerificationError, VerificationResult};

/// Inbound request for a verification code.
///
/// Only `email` is read; any other field in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct VerificationRequest {
    #[serde(alias = "Email")]
    #[validate(length(min = 1))]
    pub email: String,
}

impl VerificationRequest {
    /// Parses a raw JSON body coming from the HTTP boundary or a queue message.
    ///
    /// Surrounding whitespace of the email is dropped before validation.
    /// `Email` is accepted in place of `email`; a body carrying both keys is
    /// rejected as a duplicate field.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::Parse`] for malformed JSON, for a
    /// missing, non-string or blank `email`, and for both `email` and `Email`.
    pub fn parse(body: &[u8]) -> VerificationResult<Self> {
        let mut request: Self = serde_json::from_slice(body)
            .map_err(|e| VerificationError::Parse(e.to_string()))?;

        request.email = request.email.trim().to_string();
        request
            .validate()
            .map_err(|e| VerificationError::Parse(e.to_string()))?;

        Ok(request)
    }
}

/// The single current code stored for an email.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VerificationRecord {
    pub email: String,
    pub code: String,
    pub expiry_date: OffsetDateTime,
}

/// Outbound email handed to the delivery queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub plain_text_body: String,
}
