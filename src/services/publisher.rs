//! # Outbound Queue Publisher
//!
//! The workflow only produces an encoded payload. Handing it to the email
//! delivery queue is the job of the calling layer, through this trait.
//!
//! ## Implementations
//!
//! - [`LogPublisher`] - Development implementation that logs the payload
//! - [`HttpPublisher`] - Production implementation posting to a queue HTTP endpoint

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Errors that can occur while enqueueing a payload
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to publish message: {0}")]
    PublishFailed(String),
}

/// Trait for delivery queue publishers
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Enqueues an encoded email payload.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::PublishFailed`] if the queue did not accept it.
    async fn publish(&self, payload: &str) -> Result<(), PublishError>;
}

/// Mock publisher for development: writes the payload to the log.
pub struct LogPublisher;

#[async_trait]
impl MessagePublisher for LogPublisher {
    #[instrument(skip_all, fields(payload_len = payload.len()))]
    async fn publish(&self, payload: &str) -> Result<(), PublishError> {
        info!("Publishing mock email payload");
        debug!(%payload, "Mock payload");
        Ok(())
    }
}

/// Publisher posting payloads to a queue's HTTP ingestion endpoint.
///
/// # Configuration
///
/// Requires the following environment variables in production:
/// - `QUEUE_API_URL` - Endpoint accepting JSON messages
/// - `QUEUE_API_KEY` - Key sent with basic auth
pub struct HttpPublisher {
    api_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl HttpPublisher {
    pub fn new(api_url: String, api_key: String) -> Self {
        info!(api_url = %api_url, "Initializing queue publisher");

        Self {
            api_url,
            api_key,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MessagePublisher for HttpPublisher {
    #[instrument(skip_all, fields(api_url = %self.api_url))]
    async fn publish(&self, payload: &str) -> Result<(), PublishError> {
        debug!("Sending payload to queue endpoint");
        let response = self
            .http_client
            .post(&self.api_url)
            .basic_auth("api", Some(&self.api_key))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .send()
            .await;

        match response {
            Ok(res) if res.status().is_success() => {
                info!("Payload accepted by queue endpoint");
                Ok(())
            }
            Ok(res) => {
                let status = res.status();
                let error_body = res
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read error response body".to_string());

                error!(
                    status = %status,
                    error_body = %error_body,
                    "Queue endpoint returned error"
                );

                Err(PublishError::PublishFailed(format!(
                    "queue endpoint error {status}: {error_body}"
                )))
            }
            Err(e) => {
                error!(error = %e, "Network request to queue endpoint failed");
                Err(PublishError::PublishFailed(format!(
                    "Network request error: {e}"
                )))
            }
        }
    }
}
