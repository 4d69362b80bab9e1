//! # Message Encoding
//!
//! JSON wire format of outbound emails:
//! `{"to": .., "subject": .., "htmlBody": .., "plainTextBody": ..}`.

use tracing::error;

use crate::error::{VerificationError, VerificationResult};
use crate::models::EmailMessage;

#[derive(Debug, Default, Clone, Copy)]
pub struct MessageEncoder;

impl MessageEncoder {
    /// Serializes `message` into the queue payload.
    pub fn encode(&self, message: &EmailMessage) -> VerificationResult<String> {
        serde_json::to_string(message).map_err(|e| {
            error!(error = %e, "Failed to encode email message");
            VerificationError::from(e)
        })
    }

    /// Reads a payload produced by [`MessageEncoder::encode`].
    pub fn decode(&self, payload: &str) -> VerificationResult<EmailMessage> {
        Ok(serde_json::from_str(payload)?)
    }
}
