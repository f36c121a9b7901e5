//! A record store persisted as a single JSON file.
//!
//! The whole collection is held in memory and rewritten after every
//! mutation. Writers are serialized by an async mutex, and a mutation only
//! becomes visible once the file write has succeeded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use quizscore_core::error::StoreError;
use quizscore_core::record::UserRecord;
use quizscore_core::store::{apply_create, apply_upsert, newest_first, RecordStore, SubmissionUpdate};

/// JSON-file backed record store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: Mutex<Vec<UserRecord>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: &Path) -> Result<Self> {
        let records = match tokio::fs::read_to_string(path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("failed to parse record store: {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read record store: {}", path.display()))
            }
        };

        tracing::info!(path = %path.display(), records = records.len(), "opened record store");
        Ok(Self {
            path: path.to_path_buf(),
            records: Mutex::new(records),
        })
    }

    async fn persist(&self, records: &[UserRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|r| r.email == email).cloned())
    }

    async fn upsert_submission(&self, update: SubmissionUpdate) -> Result<UserRecord, StoreError> {
        let mut records = self.records.lock().await;
        let mut next = records.clone();
        let record = apply_upsert(&mut next, update);
        self.persist(&next).await?;
        *records = next;
        Ok(record)
    }

    async fn create(&self, record: UserRecord) -> Result<UserRecord, StoreError> {
        let mut records = self.records.lock().await;
        let mut next = records.clone();
        let record = apply_create(&mut next, record)?;
        self.persist(&next).await?;
        *records = next;
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        let records = self.records.lock().await;
        Ok(newest_first(&records))
    }

    async fn existing_emails(&self, emails: &[String]) -> Result<Vec<String>, StoreError> {
        let records = self.records.lock().await;
        Ok(emails
            .iter()
            .filter(|e| records.iter().any(|r| &r.email == *e))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizscore_core::registration::register_emails;
    use quizscore_core::scoring::ScoringEngine;

    fn update(email: &str) -> SubmissionUpdate {
        SubmissionUpdate {
            email: email.into(),
            name: "Ada".into(),
            course: "backend".into(),
            answers: vec![Some(2.0), None],
            result: ScoringEngine::default().calculate_results(&[], &[]),
        }
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(&dir.path().join("users.json")).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("users.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        let saved = store.upsert_submission(update("a@x.io")).await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let found = reopened.find_by_email("a@x.io").await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert_eq!(found.answers, vec![Some(2.0), None]);
    }

    #[tokio::test]
    async fn duplicate_create_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        store.create(UserRecord::registered("a@x.io")).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();
        assert!(store.create(UserRecord::registered("a@x.io")).await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("data");
        let store = JsonFileStore::open(&parent.join("users.json")).await.unwrap();

        // A regular file where the parent directory should be.
        std::fs::write(&parent, "not a directory").unwrap();

        assert!(store.upsert_submission(update("a@x.io")).await.is_err());
        assert!(store.find_by_email("a@x.io").await.unwrap().is_none());
        assert!(store.create(UserRecord::registered("a@x.io")).await.is_err());
        assert!(store.list().await.unwrap().is_empty());

        std::fs::remove_file(&parent).unwrap();
        let created = store.create(UserRecord::registered("a@x.io")).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn malformed_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::open(&path).await.unwrap_err();
        assert!(err.to_string().contains("failed to parse record store"));
    }

    #[tokio::test]
    async fn bulk_registration_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        let summary = register_emails(&store, &["a@x.io", "b@x.io", "A@x.io"])
            .await
            .unwrap();
        assert_eq!(summary.created, 2);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.list().await.unwrap().len(), 2);
    }
}
