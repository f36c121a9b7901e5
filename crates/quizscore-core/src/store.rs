//! Record store trait and an in-memory implementation.
//!
//! The store is keyed by normalized email. Durable backends live in the
//! `quizscore-store` crate.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::Answer;
use crate::record::UserRecord;
use crate::scoring::AssessmentResult;

/// Fields written by a scored submission.
#[derive(Debug, Clone)]
pub struct SubmissionUpdate {
    pub email: String,
    pub name: String,
    pub course: String,
    pub answers: Vec<Answer>,
    pub result: AssessmentResult,
}

/// Persistence backend for participant records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a record by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Create or update the record for `update.email`. An existing record keeps
    /// its id and creation time.
    async fn upsert_submission(&self, update: SubmissionUpdate) -> Result<UserRecord, StoreError>;

    /// Insert a new record. Fails with [`StoreError::Duplicate`] if the email
    /// is taken.
    async fn create(&self, record: UserRecord) -> Result<UserRecord, StoreError>;

    /// Every record, newest first.
    async fn list(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Records that carry a result, oldest first.
    async fn list_with_results(&self) -> Result<Vec<UserRecord>, StoreError> {
        let mut records = self.list().await?;
        records.retain(UserRecord::has_result);
        records.reverse();
        Ok(records)
    }

    /// The subset of `emails` that already have records.
    async fn existing_emails(&self, emails: &[String]) -> Result<Vec<String>, StoreError>;
}

/// Apply an upsert to an in-memory record list. Shared by every backend that
/// keeps the full collection in memory.
pub fn apply_upsert(records: &mut Vec<UserRecord>, update: SubmissionUpdate) -> UserRecord {
    if let Some(existing) = records.iter_mut().find(|r| r.email == update.email) {
        existing.name = update.name;
        existing.course = update.course;
        existing.answers = update.answers;
        existing.result = Some(update.result);
        return existing.clone();
    }

    let mut record = UserRecord::registered(update.email);
    record.name = update.name;
    record.course = update.course;
    record.answers = update.answers;
    record.result = Some(update.result);
    records.push(record.clone());
    record
}

/// Insert `record` unless its email is already present.
pub fn apply_create(records: &mut Vec<UserRecord>, record: UserRecord) -> Result<UserRecord, StoreError> {
    if records.iter().any(|r| r.email == record.email) {
        return Err(StoreError::Duplicate(record.email));
    }
    records.push(record.clone());
    Ok(record)
}

/// Records sorted newest first; ties keep later insertions first.
pub fn newest_first(records: &[UserRecord]) -> Vec<UserRecord> {
    let mut sorted: Vec<UserRecord> = records.iter().rev().cloned().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`.
    pub fn with_records(records: Vec<UserRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<UserRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<UserRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.read().iter().find(|r| r.email == email).cloned())
    }

    async fn upsert_submission(&self, update: SubmissionUpdate) -> Result<UserRecord, StoreError> {
        Ok(apply_upsert(&mut self.write(), update))
    }

    async fn create(&self, record: UserRecord) -> Result<UserRecord, StoreError> {
        apply_create(&mut self.write(), record)
    }

    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(newest_first(&self.read()))
    }

    async fn existing_emails(&self, emails: &[String]) -> Result<Vec<String>, StoreError> {
        let records = self.read();
        Ok(emails
            .iter()
            .filter(|e| records.iter().any(|r| &r.email == *e))
            .cloned()
            .collect())
    }
}
