//! Durable reading position persistence
//!
//! One JSON record per document id, fully overwritten on every position
//! change. Writes go to a sibling temp file and are renamed into place, so
//! a `put` that returned `Ok` stays readable even if the process dies right
//! after it; a later `get` never sees a half-written record.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::position::ReadingPosition;

/// Errors from reading or writing position records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk full, permission denied, path missing and friends
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The record file exists but does not parse
    #[error("Corrupt position record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Interface for per-document position persistence.
///
/// `put` fully overwrites any prior record for the id; `get` returns `None`
/// when no record exists (the caller defaults to page 0).
pub trait PositionStore {
    /// Last persisted position for a document, if any.
    fn get(&self, document_id: &str) -> Result<Option<ReadingPosition>>;

    /// Durably persist the position for a document.
    fn put(&mut self, document_id: &str, page_index: usize) -> Result<()>;
}

/// On-disk representation of one document's reading position.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PositionRecord {
    document_id: String,
    page_index: usize,
    updated_at: DateTime<Utc>,
}

/// Filesystem-backed [`PositionStore`] keeping one record file per book
/// under a base directory.
pub struct FilePositionStore {
    dir: PathBuf,
}

impl FilePositionStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, document_id: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", urlencoding::encode(document_id)))
    }
}

impl PositionStore for FilePositionStore {
    fn get(&self, document_id: &str) -> Result<Option<ReadingPosition>> {
        let path = self.record_path(document_id);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: PositionRecord = serde_json::from_str(&data)?;
        Ok(Some(ReadingPosition::new(
            record.document_id,
            record.page_index,
        )))
    }

    fn put(&mut self, document_id: &str, page_index: usize) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let record = PositionRecord {
            document_id: document_id.to_string(),
            page_index,
            updated_at: Utc::now(),
        };
        let data = serde_json::to_vec_pretty(&record)?;

        let path = self.record_path(document_id);
        let tmp = self
            .dir
            .join(format!("{}.json.tmp", urlencoding::encode(document_id)));

        let mut file = fs::File::create(&tmp)?;
        file.write_all(&data)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &path)?;

        tracing::debug!(
            document_id = %document_id,
            page_index,
            "persisted reading position"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_record_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FilePositionStore::new(dir.path());

        assert!(store.get("book-1").unwrap().is_none());
    }

    #[test]
    fn put_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = FilePositionStore::new(dir.path());

        store.put("book-1", 17).unwrap();

        let position = store.get("book-1").unwrap().unwrap();
        assert_eq!(position, ReadingPosition::new("book-1", 17));
    }

    #[test]
    fn survives_store_reinstantiation() {
        let dir = TempDir::new().unwrap();

        let mut store = FilePositionStore::new(dir.path());
        store.put("book-1", 42).unwrap();
        drop(store);

        // A fresh instance over the same directory models a process restart.
        let store = FilePositionStore::new(dir.path());
        let position = store.get("book-1").unwrap().unwrap();
        assert_eq!(position.page_index, 42);
    }

    #[test]
    fn put_overwrites_prior_record() {
        let dir = TempDir::new().unwrap();
        let mut store = FilePositionStore::new(dir.path());

        store.put("book-1", 3).unwrap();
        store.put("book-1", 9).unwrap();

        assert_eq!(store.get("book-1").unwrap().unwrap().page_index, 9);
        // One record file per book, no temp residue.
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn records_are_kept_per_document() {
        let dir = TempDir::new().unwrap();
        let mut store = FilePositionStore::new(dir.path());

        store.put("book-1", 1).unwrap();
        store.put("book-2", 2).unwrap();

        assert_eq!(store.get("book-1").unwrap().unwrap().page_index, 1);
        assert_eq!(store.get("book-2").unwrap().unwrap().page_index, 2);
    }

    #[test]
    fn document_ids_with_path_characters_are_safe() {
        let dir = TempDir::new().unwrap();
        let mut store = FilePositionStore::new(dir.path());

        store.put("shelf/livro 1", 5).unwrap();

        assert_eq!(store.get("shelf/livro 1").unwrap().unwrap().page_index, 5);
        // The record landed inside the store directory, not a subpath.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn corrupt_record_is_an_error_not_a_default() {
        let dir = TempDir::new().unwrap();
        let mut store = FilePositionStore::new(dir.path());

        store.put("book-1", 4).unwrap();
        fs::write(store.record_path("book-1"), b"{ not json").unwrap();

        assert!(matches!(store.get("book-1"), Err(StoreError::Corrupt(_))));
    }
}
