mod state;
mod verification;

pub use state::AppState;
pub use verification::{EmailMessage, VerificationRecord, VerificationRequest};
