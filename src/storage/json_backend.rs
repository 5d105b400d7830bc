use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Duration;

use crate::{
    core::clock::{Clock, SystemClock},
    utils::paths::{ensure_dir, write_file_atomic},
};

use super::{KeyValueStore, Result, StoredEntry};

type Document = BTreeMap<String, StoredEntry>;

/// Filesystem-backed store keeping every key in one JSON document.
///
/// Each write rewrites the document through a temporary file and a rename,
/// so a failed write leaves the previous document intact.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    pub fn with_clock(path: PathBuf, clock: Arc<dyn Clock>) -> Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        Ok(Self { path, clock })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Document> {
        if !self.path.exists() {
            return Ok(Document::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Document::new());
        }
        match serde_json::from_str(&data) {
            Ok(document) => Ok(document),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "store document is unreadable; treating it as empty"
                );
                Ok(Document::new())
            }
        }
    }

    fn write_document(&self, document: &Document) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        write_file_atomic(&self.path, &json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut document = self.read_document()?;
        let now = self.clock.now();
        match document.get(key) {
            Some(entry) if entry.is_expired(now) => {
                tracing::debug!(key, "stored entry expired");
                document.remove(key);
                self.write_document(&document)?;
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let entry = StoredEntry::new(value, self.clock.now(), ttl)?;
        let mut document = self.read_document()?;
        document.insert(key.to_string(), entry);
        self.write_document(&document)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut document = self.read_document()?;
        if document.remove(key).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}
