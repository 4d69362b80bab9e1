//! # Utility Modules
//!
//! Constants, secret lookup and email markup helpers shared by the services.
//!
//! ## Available Utilities
//!
//! - **Constants** (`constant`) - Code range, TTL and template text
//! - **HTML** (`html`) - Verification email templates and escaping
//! - **Secrets** (`secret`) - Environment and secret-file lookup

pub mod constant;
pub mod html;
pub mod secret;
