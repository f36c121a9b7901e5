//! quizscore-store: Record store backends.
//!
//! Implements the `RecordStore` trait on top of a JSON file. The in-memory
//! store used by tests lives in `quizscore-core`.

pub mod json_file;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use quizscore_core::store::RecordStore;

pub use json_file::JsonFileStore;

/// Open the JSON file store at `path` behind the shared store trait.
pub async fn open_store(path: &Path) -> Result<Arc<dyn RecordStore>> {
    Ok(Arc::new(JsonFileStore::open(path).await?))
}
