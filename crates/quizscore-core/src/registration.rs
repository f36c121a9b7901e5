//! Pre-registration of participant emails.

use std::collections::HashSet;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::{RegistrationError, StoreError};
use crate::record::{dedupe_emails, normalize_email, UserRecord};
use crate::store::RecordStore;

/// Default number of emails sent per upload batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Outcome of a bulk registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSummary {
    /// Records created.
    pub created: usize,
    /// Emails that were already registered.
    pub skipped: usize,
    /// Creations that failed.
    pub failed: usize,
}

impl std::ops::AddAssign for RegistrationSummary {
    fn add_assign(&mut self, other: Self) {
        self.created += other.created;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Register a single email with a blank record.
pub async fn register_email(
    store: &dyn RecordStore,
    raw: &str,
) -> Result<UserRecord, RegistrationError> {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Err(RegistrationError::Empty);
    }
    if store.find_by_email(&email).await?.is_some() {
        return Err(RegistrationError::AlreadyRegistered);
    }

    let record = match store.create(UserRecord::registered(email)).await {
        Ok(record) => record,
        Err(StoreError::Duplicate(_)) => return Err(RegistrationError::AlreadyRegistered),
        Err(e) => return Err(e.into()),
    };
    tracing::info!(email = %record.email, "registered email");
    Ok(record)
}

/// Register many emails at once.
///
/// Emails are normalized and deduplicated first. Every creation is attempted
/// even if others fail; failures are counted, not returned.
pub async fn register_emails<S: AsRef<str>>(
    store: &dyn RecordStore,
    raw: &[S],
) -> Result<RegistrationSummary, RegistrationError> {
    let emails = dedupe_emails(raw);
    let existing: HashSet<String> = store
        .existing_emails(&emails)
        .await?
        .into_iter()
        .collect();

    let fresh: Vec<&String> = emails.iter().filter(|e| !existing.contains(*e)).collect();
    let outcomes = join_all(
        fresh
            .iter()
            .map(|email| store.create(UserRecord::registered(email.as_str()))),
    )
    .await;

    let mut summary = RegistrationSummary {
        skipped: existing.len(),
        ..Default::default()
    };
    for (email, outcome) in fresh.iter().zip(outcomes) {
        match outcome {
            Ok(_) => summary.created += 1,
            Err(StoreError::Duplicate(_)) => summary.skipped += 1,
            Err(e) => {
                tracing::warn!(%email, "failed to register email: {e}");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        created = summary.created,
        skipped = summary.skipped,
        failed = summary.failed,
        "bulk email registration finished"
    );
    Ok(summary)
}

/// Split emails into batches of at most `size` (a size of 0 is treated as 1).
pub fn chunk_emails(emails: &[String], size: usize) -> Vec<Vec<String>> {
    emails.chunks(size.max(1)).map(<[String]>::to_vec).collect()
}
