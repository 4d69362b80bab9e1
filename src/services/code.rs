//! # Verification Code Generation
//!
//! Codes are drawn uniformly from `[CODE_MIN, CODE_MAX]` and rendered as
//! six decimal digits. The randomness comes from an injected [`CodeSource`]
//! so deterministic sources can be supplied in tests.

use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, error, instrument};

use crate::error::{VerificationError, VerificationResult};
use crate::utils::constant::{CODE_MAX, CODE_MIN};

/// A source of uniformly distributed integers.
pub trait CodeSource: Send + Sync {
    /// Draws one value from `range`.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::Generation`] if no randomness is available.
    fn draw(&self, range: RangeInclusive<u32>) -> VerificationResult<u32>;
}

/// Production source backed by operating-system entropy.
///
/// A fresh `StdRng` is seeded from the OS for every draw, so a failing
/// entropy source surfaces as an error instead of a panic.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsCodeSource;

impl CodeSource for OsCodeSource {
    fn draw(&self, range: RangeInclusive<u32>) -> VerificationResult<u32> {
        let mut rng = StdRng::try_from_os_rng().map_err(|e| {
            error!(error = %e, "OS random source unavailable");
            VerificationError::Generation(e.to_string())
        })?;
        Ok(rng.random_range(range))
    }
}

/// Deterministic source for reproducible runs.
#[derive(Debug)]
pub struct SeededCodeSource {
    rng: Mutex<StdRng>,
}

impl SeededCodeSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CodeSource for SeededCodeSource {
    fn draw(&self, range: RangeInclusive<u32>) -> VerificationResult<u32> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| VerificationError::Generation("seeded source poisoned".into()))?;
        Ok(rng.random_range(range))
    }
}

/// Produces six-digit numeric verification codes.
#[derive(Clone)]
pub struct CodeGenerator {
    source: Arc<dyn CodeSource>,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(Arc::new(OsCodeSource))
    }
}

impl CodeGenerator {
    pub fn new(source: Arc<dyn CodeSource>) -> Self {
        Self { source }
    }

    /// Generates a code in `[CODE_MIN, CODE_MAX]` as a decimal string.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::Generation`] when the source fails or
    /// yields a value outside the code range.
    #[instrument(skip(self))]
    pub fn generate(&self) -> VerificationResult<String> {
        let value = self.source.draw(CODE_MIN..=CODE_MAX)?;
        if !(CODE_MIN..=CODE_MAX).contains(&value) {
            error!(value, "Random source returned a value outside the code range");
            return Err(VerificationError::Generation(format!(
                "drawn value {value} outside {CODE_MIN}..={CODE_MAX}"
            )));
        }

        debug!("Generated verification code");
        Ok(value.to_string())
    }
}
