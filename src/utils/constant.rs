//! # Application Constants
//!
//! Fixed values that shape verification codes and their lifetime.

use std::time::Duration;

/// Validity window of a freshly written verification code.
///
/// Every upsert moves the record's expiry to `now + VERIFICATION_CODE_TTL`.
pub const VERIFICATION_CODE_TTL: Duration = Duration::from_secs(5 * 60);

/// Smallest code that can be issued. Guarantees six digits without padding.
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued (inclusive).
pub const CODE_MAX: u32 = 999_999;

/// Number of decimal digits in every issued code.
pub const CODE_LENGTH: usize = 6;

/// Listen address used when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8090";

/// Subject line prefix of verification emails.
pub const EMAIL_SUBJECT_PREFIX: &str = "Verification Code";

/// Warning appended to both email bodies.
pub const COMPROMISE_WARNING: &str = "If you didn't request this code, it is possible someone is trying to access your account, and you should change your password immediately.";

/// Footer line of the HTML email.
pub const EMAIL_FOOTER: &str = "This is an automated message, please do not reply.";
