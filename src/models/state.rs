use std::sync::Arc;

use tracing::info;

use crate::services::{publisher::MessagePublisher, workflow::VerificationWorkflow};

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// The verification pipeline, including its store.
    pub workflow: VerificationWorkflow,
    /// Hand-off of encoded email payloads to the delivery queue.
    pub publisher: Arc<dyn MessagePublisher>,
}

impl AppState {
    /// Creates a new application state with the provided services.
    ///
    /// # Arguments
    ///
    /// * `workflow` - Verification pipeline
    /// * `publisher` - Queue publisher for composed emails
    pub fn new(workflow: VerificationWorkflow, publisher: Arc<dyn MessagePublisher>) -> Self {
        info!("Initializing application state");
        Self {
            workflow,
            publisher,
        }
    }
}
