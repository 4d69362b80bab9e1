//! # Centralized Error Handling
//!
//! Every stage of the verification pipeline fails with one of the variants of
//! [`VerificationError`]. All of them are terminal for the current request.
//! The HTTP boundary maps them to a status code and a fixed message; the
//! detailed cause is only ever written to the log.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failure kinds of a single verification request.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// Request body was malformed or carried no usable email.
    #[error("invalid verification request: {0}")]
    Parse(String),

    /// The random source could not produce a code.
    #[error("code generation failed: {0}")]
    Generation(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Inputs to the email template were unusable.
    #[error("email composition failed: {0}")]
    Composition(&'static str),

    #[error("payload encoding failed")]
    Encoding(#[from] serde_json::Error),
}

impl VerificationError {
    /// Short, stable name of the failure kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationError::Parse(_) => "parse",
            VerificationError::Generation(_) => "generation",
            VerificationError::Storage(_) => "storage",
            VerificationError::Composition(_) => "composition",
            VerificationError::Encoding(_) => "encoding",
        }
    }
}

/// Failures of the persistence collaborator.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("email must not be empty")]
    EmptyEmail,

    /// Backend could not be reached. Not produced by the bundled stores; for
    /// custom [`VerificationStore`](crate::services::store::VerificationStore)
    /// implementations and test doubles.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for VerificationError {
    fn from(e: sqlx::Error) -> Self {
        VerificationError::Storage(StorageError::Database(e))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
}

impl IntoResponse for VerificationError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            VerificationError::Parse(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
            VerificationError::Composition(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
            VerificationError::Generation(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            VerificationError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            VerificationError::Encoding(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        if status.is_server_error() {
            error!(error = %self, kind = self.kind(), "Verification request failed");
        } else {
            warn!(error = %self, kind = self.kind(), "Verification request rejected");
        }

        let body = Json(ErrorBody { message });
        (status, body).into_response()
    }
}

/// Convenience Result type alias that uses VerificationError as the error type.
pub type VerificationResult<T> = Result<T, VerificationError>;
