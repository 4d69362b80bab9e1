//! # Business Logic Services
//!
//! ## Available Services
//!
//! - **Code** (`code`) - Six-digit code generation from an injected random source
//! - **Store** (`store`) - One current code per email, upserted
//! - **Email** (`email`) - Verification email composition
//! - **Encoder** (`encoder`) - JSON payload for the delivery queue
//! - **Workflow** (`workflow`) - The request pipeline tying the above together
//! - **Publisher** (`publisher`) - Hand-off of payloads to the delivery queue

pub mod code;
pub mod email;
pub mod encoder;
pub mod publisher;
pub mod store;
pub mod workflow;
