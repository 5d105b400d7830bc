//! Persistence: an abstract expiring key-value store plus the adapter that
//! keeps the ledger in it as a single text blob.

pub mod json_backend;
pub mod memory;
pub mod persistence;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;
pub use crate::errors::Result;

/// String-keyed store whose entries expire.
///
/// Reading an expired entry behaves exactly like reading a missing one.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        (**self).set(key, value, ttl)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// A stored value together with the instant it stops being readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredEntry {
    /// Fails when `now + ttl` falls outside the representable date range.
    pub fn new(value: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Result<Self> {
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            LedgerError::Storage(format!(
                "expiry of {} days from {} is out of range",
                ttl.num_days(),
                now
            ))
        })?;
        Ok(Self {
            value: value.into(),
            expires_at,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use persistence::{
    ledger_warnings, LedgerPersistence, LoadReport, LoadStatus, DEFAULT_RETENTION_DAYS,
    DEFAULT_STORAGE_KEY, MAX_RETENTION_DAYS,
};
