use std::collections::HashSet;

use chrono::Duration;

use crate::ledger::Ledger;

use super::{KeyValueStore, Result};

/// Key the ledger blob is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "transactions";
/// How long a saved ledger stays readable after its last write.
pub const DEFAULT_RETENTION_DAYS: i64 = 365;
/// Upper bound on retention, roughly a century.
pub const MAX_RETENTION_DAYS: i64 = 36_500;

/// Outcome of reading the ledger blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing stored under the key (or it expired).
    Missing,
    Loaded,
    /// The stored value could not be read or parsed; an empty ledger was used.
    Recovered(String),
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub status: LoadStatus,
    pub warnings: Vec<String>,
}

/// Saves and loads the whole ledger as one serialized string.
pub struct LedgerPersistence {
    store: Box<dyn KeyValueStore>,
    key: String,
    ttl: Duration,
}

impl LedgerPersistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: DEFAULT_STORAGE_KEY.to_string(),
            ttl: Duration::days(DEFAULT_RETENTION_DAYS),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_retention_days(mut self, days: i64) -> Self {
        self.ttl = Duration::days(days.clamp(1, MAX_RETENTION_DAYS));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Serializes the full ledger and writes it under the configured key.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let blob = serde_json::to_string(ledger)?;
        self.store.set(&self.key, &blob, self.ttl)?;
        tracing::debug!(key = %self.key, entries = ledger.len(), "ledger saved");
        Ok(())
    }

    /// Reads the ledger, degrading to an empty one on any failure.
    pub fn load(&self) -> Ledger {
        self.load_report().ledger
    }

    pub fn load_report(&self) -> LoadReport {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!(key = %self.key, "no saved ledger; starting empty");
                return LoadReport {
                    ledger: Ledger::new(),
                    status: LoadStatus::Missing,
                    warnings: Vec::new(),
                };
            }
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "failed to read saved ledger");
                return recovered(err.to_string());
            }
        };

        match serde_json::from_str::<Ledger>(&raw) {
            Ok(ledger) => {
                let warnings = ledger_warnings(&ledger);
                for warning in &warnings {
                    tracing::warn!(key = %self.key, "{}", warning);
                }
                tracing::info!(key = %self.key, entries = ledger.len(), "ledger loaded");
                LoadReport {
                    ledger,
                    status: LoadStatus::Loaded,
                    warnings,
                }
            }
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "error parsing saved ledger");
                recovered(err.to_string())
            }
        }
    }
}

fn recovered(reason: String) -> LoadReport {
    LoadReport {
        ledger: Ledger::new(),
        status: LoadStatus::Recovered(reason),
        warnings: Vec::new(),
    }
}

/// Detects anomalies in a loaded ledger that creation would have prevented.
pub fn ledger_warnings(ledger: &Ledger) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for txn in ledger {
        if !seen.insert(txn.id) {
            warnings.push(format!("transaction id {} appears more than once", txn.id));
        }
        if txn.amount == 0.0 {
            warnings.push(format!("transaction {} has a zero amount", txn.id));
        }
        if txn.description.trim().is_empty() {
            warnings.push(format!("transaction {} has an empty description", txn.id));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Transaction, TransactionKind};
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn persistence() -> (LedgerPersistence, Arc<MemoryStore>) {
        let backing = Arc::new(MemoryStore::new());
        let persistence = LedgerPersistence::new(Box::new(backing.clone()));
        (persistence, backing)
    }

    #[test]
    fn missing_key_loads_empty_ledger() {
        let (persistence, _) = persistence();
        let report = persistence.load_report();
        assert_eq!(report.status, LoadStatus::Missing);
        assert!(report.ledger.is_empty());
    }

    #[test]
    fn save_then_load_returns_equal_ledger() {
        let (persistence, _) = persistence();
        let ledger = Ledger::from_transactions(vec![
            Transaction::new(1, "Salary", 1000.0, TransactionKind::Income),
            Transaction::new(2, "Coffee", 0.1 + 0.2, TransactionKind::Expense),
        ]);
        persistence.save(&ledger).unwrap();
        let report = persistence.load_report();
        assert_eq!(report.status, LoadStatus::Loaded);
        assert_eq!(report.ledger, ledger);
    }

    #[test]
    fn malformed_blob_recovers_to_empty() {
        let (persistence, backing) = persistence();
        backing
            .set(DEFAULT_STORAGE_KEY, "[{\"id\": 1, \"descr", Duration::days(1))
            .unwrap();
        let report = persistence.load_report();
        assert!(matches!(report.status, LoadStatus::Recovered(_)));
        assert!(report.ledger.is_empty());
    }

    #[test]
    fn blob_with_wrong_shape_recovers_to_empty() {
        let (persistence, backing) = persistence();
        backing
            .set(DEFAULT_STORAGE_KEY, "{\"id\": 1}", Duration::days(1))
            .unwrap();
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn custom_key_is_used_for_writes() {
        let (persistence, backing) = persistence();
        let persistence = persistence.with_key("ledger-v2").with_retention_days(30);
        persistence.save(&Ledger::new()).unwrap();
        assert_eq!(backing.get("ledger-v2").unwrap().as_deref(), Some("[]"));
        assert_eq!(backing.get(DEFAULT_STORAGE_KEY).unwrap(), None);
        assert_eq!(persistence.ttl(), Duration::days(30));
    }

    #[test]
    fn huge_retention_is_capped_and_saves_succeed() {
        let (persistence, backing) = persistence();
        let persistence = persistence.with_retention_days(i64::MAX);
        assert_eq!(persistence.ttl(), Duration::days(MAX_RETENTION_DAYS));
        persistence.save(&Ledger::new()).unwrap();
        assert_eq!(backing.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some("[]"));

        let persistence = LedgerPersistence::new(Box::new(MemoryStore::new()))
            .with_retention_days(100_000_000);
        assert_eq!(persistence.ttl(), Duration::days(MAX_RETENTION_DAYS));
    }

    #[test]
    fn warnings_flag_duplicate_ids_and_zero_amounts() {
        let ledger = Ledger::from_transactions(vec![
            Transaction::new(5, "A", 1.0, TransactionKind::Income),
            Transaction::new(5, "B", 0.0, TransactionKind::Income),
        ]);
        let warnings = ledger_warnings(&ledger);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("more than once"));
        assert!(warnings[1].contains("zero amount"));
    }
}
