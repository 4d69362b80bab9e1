//! # Verification Provider
//!
//! Issues short-lived six-digit codes for email addresses: a request is
//! parsed, a code is generated and upserted with a five minute expiry, and
//! an email message carrying the code is encoded for the delivery queue.
//!
//! ## Modules
//!
//! - [`error`] - Failure taxonomy of the verification pipeline
//! - [`handlers`] - HTTP boundary
//! - [`models`] - Request, stored record and outbound email types
//! - [`services`] - Code generation, storage, composition, encoding and the workflow
//! - [`utils`] - Constants, templates and secret lookup

pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use std::env;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::PgPool;
use tracing::info;

use crate::handlers::{generate_verification_code, health_check};
use crate::models::AppState;
use crate::services::publisher::{HttpPublisher, LogPublisher, MessagePublisher};
use crate::services::store::PgVerificationStore;
use crate::services::workflow::VerificationWorkflow;
use crate::utils::secret::require_secret;

/// Selects the queue publisher from the environment.
///
/// # Environment Variables
///
/// - `APP_ENV` - "production" uses [`HttpPublisher`], otherwise [`LogPublisher`]
/// - `QUEUE_API_URL` - Required in production
/// - `QUEUE_API_KEY` / `QUEUE_API_KEY_FILE` - Required in production
///
/// # Errors
///
/// Returns a message naming the missing setting.
pub fn publisher_from_env() -> Result<Arc<dyn MessagePublisher>, String> {
    let app_env = env::var("APP_ENV")
        .map_err(|_| "Env variable `APP_ENV` should be set".to_string())?
        .to_ascii_lowercase();

    if app_env == "production" {
        info!("Running in production mode with [HttpPublisher]");
        let api_url = env::var("QUEUE_API_URL")
            .map_err(|_| "Env variable `QUEUE_API_URL` should be set".to_string())?;
        let api_key = require_secret("QUEUE_API_KEY")?;
        Ok(Arc::new(HttpPublisher::new(api_url, api_key)))
    } else {
        info!("Running in development mode with [LogPublisher (Mock)]");
        Ok(Arc::new(LogPublisher))
    }
}

/// Creates the router backed by PostgreSQL and the OS random source.
pub fn app(db_pool: PgPool, publisher: Arc<dyn MessagePublisher>) -> Router {
    let store = Arc::new(PgVerificationStore::new(db_pool));
    let workflow = VerificationWorkflow::with_store(store);
    app_with_state(Arc::new(AppState::new(workflow, publisher)))
}

/// Creates the router for an already assembled state.
pub fn app_with_state(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health-check", get(health_check))
        .route(
            "/api/verification/generate",
            post(generate_verification_code),
        )
        .with_state(state)
}
