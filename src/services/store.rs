//! # Verification Store
//!
//! Holds the single current code per email. Writing a code for an email that
//! already has one replaces its code and expiry in place.
//!
//! ## Implementations
//!
//! - [`PgVerificationStore`] - PostgreSQL, one `INSERT .. ON CONFLICT` statement per upsert
//! - [`MemoryVerificationStore`] - In-process map for tests and database-less runs
//!
//! Both make the per-email write atomic. Concurrent upserts for the same email
//! are not ordered beyond that: the last write wins.
//!
//! A refreshed expiry is `max(now + ttl, previous + one tick)`, so it is always
//! strictly later than the one it replaces. The cost: if a previous write
//! stored an expiry beyond `now + ttl` (for example after the wall clock
//! stepped backwards), the refreshed expiry stays just past that value rather
//! than being reset to `now + ttl`.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{debug, info, instrument};

use crate::error::{StorageError, VerificationResult};
use crate::models::VerificationRecord;

/// Persistence collaborator keyed by email.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Stores `code` for `email` with an expiry of `now + ttl`.
    ///
    /// An existing record is updated in place. The new expiry is always
    /// strictly later than the one it replaces.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::EmptyEmail`] for an empty email, and other
    /// [`StorageError`] variants when the backend rejects the write.
    async fn upsert(
        &self,
        email: &str,
        code: &str,
        ttl: Duration,
    ) -> VerificationResult<VerificationRecord>;

    /// Looks up the current record for `email`.
    async fn find_by_email(&self, email: &str) -> VerificationResult<Option<VerificationRecord>>;
}

/// PostgreSQL-backed store using the `verification_requests` table.
#[derive(Clone)]
pub struct PgVerificationStore {
    db_pool: PgPool,
}

impl PgVerificationStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl VerificationStore for PgVerificationStore {
    #[instrument(skip(self, code))]
    async fn upsert(
        &self,
        email: &str,
        code: &str,
        ttl: Duration,
    ) -> VerificationResult<VerificationRecord> {
        if email.is_empty() {
            return Err(StorageError::EmptyEmail.into());
        }

        let expiry_date = OffsetDateTime::now_utc() + ttl;

        // GREATEST keeps the refreshed expiry ahead of the old one at microsecond resolution.
        let record = sqlx::query_as::<_, VerificationRecord>(
            r#"
            INSERT INTO verification_requests (email, code, expiry_date)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET code = EXCLUDED.code,
                expiry_date = GREATEST(
                    EXCLUDED.expiry_date,
                    verification_requests.expiry_date + INTERVAL '1 microsecond'
                )
            RETURNING email, code, expiry_date
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(expiry_date)
        .fetch_one(&self.db_pool)
        .await
        .map_err(StorageError::from)?;

        info!(expiry_date = %record.expiry_date, "Verification code stored");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> VerificationResult<Option<VerificationRecord>> {
        let record = sqlx::query_as::<_, VerificationRecord>(
            r#"
            SELECT email, code, expiry_date
            FROM verification_requests
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(StorageError::from)?;

        debug!(found = record.is_some(), "Looked up verification record");
        Ok(record)
    }
}

/// In-memory store. The map's entry API locks the email's shard for the
/// whole read-modify-write.
#[derive(Debug, Default)]
pub struct MemoryVerificationStore {
    records: DashMap<String, VerificationRecord>,
}

impl MemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl VerificationStore for MemoryVerificationStore {
    #[instrument(skip(self, code))]
    async fn upsert(
        &self,
        email: &str,
        code: &str,
        ttl: Duration,
    ) -> VerificationResult<VerificationRecord> {
        if email.is_empty() {
            return Err(StorageError::EmptyEmail.into());
        }

        let expiry_date = OffsetDateTime::now_utc() + ttl;

        let record = match self.records.entry(email.to_string()) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.code = code.to_string();
                existing.expiry_date =
                    expiry_date.max(existing.expiry_date + time::Duration::nanoseconds(1));
                debug!("Refreshed existing verification record");
                existing.clone()
            }
            Entry::Vacant(entry) => {
                debug!("Inserted new verification record");
                entry
                    .insert(VerificationRecord {
                        email: email.to_string(),
                        code: code.to_string(),
                        expiry_date,
                    })
                    .value()
                    .clone()
            }
        };

        info!(expiry_date = %record.expiry_date, "Verification code stored");
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> VerificationResult<Option<VerificationRecord>> {
        Ok(self.records.get(email).map(|entry| entry.value().clone()))
    }
}
