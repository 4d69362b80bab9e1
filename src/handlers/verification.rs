//! # Verification Code Handler
//!
//! Accepts `{"email": ".."}`, runs the verification workflow and hands the
//! resulting email payload to the delivery queue.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument};

use crate::models::AppState;

/// Generates, stores and enqueues a verification code.
///
/// # Returns
///
/// - `200 OK` - Body is the JSON email payload that was enqueued
/// - `400 Bad Request` - Malformed body or missing email
/// - `500 Internal Server Error` - Code generation, storage or encoding failed
/// - `502 Bad Gateway` - Payload built but the queue did not accept it
#[instrument(skip_all, fields(body_len = body.len()))]
pub async fn generate_verification_code(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let payload = match state.workflow.handle(&body).await {
        Ok(payload) => payload,
        Err(e) => return e.into_response(),
    };

    if let Err(e) = state.publisher.publish(&payload).await {
        error!(error = %e, "Failed to enqueue verification email");
        return (StatusCode::BAD_GATEWAY, "Failed to enqueue email").into_response();
    }

    info!("Verification code issued");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        payload,
    )
        .into_response()
}
