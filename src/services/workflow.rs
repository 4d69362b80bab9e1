//! # Verification Workflow
//!
//! Runs one verification request through the strict pipeline:
//!
//! 1. Parse the raw body into a [`VerificationRequest`]
//! 2. Generate a code
//! 3. Upsert it with a [`VERIFICATION_CODE_TTL`] expiry
//! 4. Compose the email
//! 5. Encode the payload
//!
//! The first failing step ends the request. An email is never produced for a
//! code that was not stored, and nothing is stored for a request that did
//! not parse. A stored code is kept even if a later step fails.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::code::CodeGenerator;
use super::email::EmailComposer;
use super::encoder::MessageEncoder;
use super::store::VerificationStore;
use crate::error::VerificationResult;
use crate::models::VerificationRequest;
use crate::utils::constant::VERIFICATION_CODE_TTL;

#[derive(Clone)]
pub struct VerificationWorkflow {
    generator: CodeGenerator,
    store: Arc<dyn VerificationStore>,
    composer: EmailComposer,
    encoder: MessageEncoder,
}

impl VerificationWorkflow {
    pub fn new(generator: CodeGenerator, store: Arc<dyn VerificationStore>) -> Self {
        Self {
            generator,
            store,
            composer: EmailComposer,
            encoder: MessageEncoder,
        }
    }

    /// Workflow with the OS random source.
    pub fn with_store(store: Arc<dyn VerificationStore>) -> Self {
        Self::new(CodeGenerator::default(), store)
    }

    /// Handles a raw request body and returns the encoded email payload.
    ///
    /// # Errors
    ///
    /// Returns the [`crate::error::VerificationError`] of the first step that failed.
    #[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
    pub async fn handle(&self, raw_request_body: &[u8]) -> VerificationResult<String> {
        let request = VerificationRequest::parse(raw_request_body).inspect_err(|e| {
            warn!(error = %e, "Rejected verification request body");
        })?;
        self.handle_request(&request).await
    }

    /// Runs steps 2-5 for an already parsed request.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn handle_request(&self, request: &VerificationRequest) -> VerificationResult<String> {
        debug!("Processing verification request");

        let code = self.generator.generate()?;

        let record = self
            .store
            .upsert(&request.email, &code, VERIFICATION_CODE_TTL)
            .await?;
        debug!(expiry_date = %record.expiry_date, "Verification record saved");

        let message = self.composer.compose(&request.email, &record.code)?;
        let payload = self.encoder.encode(&message)?;

        info!("Verification email payload ready");
        Ok(payload)
    }
}
