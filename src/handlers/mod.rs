//! # HTTP Request Handlers
//!
//! Thin HTTP boundary over the verification workflow.
//!
//! ## Available Handlers
//!
//! - **Verification** (`verification`) - Code generation endpoint
//! - **Health Check** (`health_check`) - Application health monitoring

mod health_check;
mod verification;

pub use health_check::*;
pub use verification::*;
