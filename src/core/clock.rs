use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

use crate::{
    errors::{LedgerError, Result},
    ledger::{Ledger, TransactionId},
};

/// Clock abstracts access to the current timestamp so ids and expiry stay
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.millis.store(at.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Picks the id for a new entry: the creation timestamp in milliseconds,
/// bumped past the largest existing id when the clock has not moved on.
///
/// Fails when the largest existing id is already `i64::MAX`.
pub fn next_transaction_id(clock: &dyn Clock, ledger: &Ledger) -> Result<TransactionId> {
    let stamp = clock.now().timestamp_millis();
    match ledger.max_id() {
        Some(max) if stamp <= max => max.checked_add(1).ok_or_else(|| {
            LedgerError::Storage(format!("no transaction id left after {}", max))
        }),
        _ => Ok(stamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Transaction, TransactionKind};
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn id_is_creation_timestamp_when_ledger_is_empty() {
        let clock = ManualClock::new(start());
        let id = next_transaction_id(&clock, &Ledger::new()).unwrap();
        assert_eq!(id, start().timestamp_millis());
    }

    #[test]
    fn id_stays_strictly_increasing_within_one_millisecond() {
        let clock = ManualClock::new(start());
        let first = next_transaction_id(&clock, &Ledger::new()).unwrap();
        let ledger = Ledger::from_transactions(vec![Transaction::new(
            first,
            "Salary",
            1.0,
            TransactionKind::Income,
        )]);
        assert_eq!(next_transaction_id(&clock, &ledger).unwrap(), first + 1);

        clock.advance(Duration::seconds(1));
        assert_eq!(next_transaction_id(&clock, &ledger).unwrap(), first + 1000);
    }

    #[test]
    fn exhausted_id_space_is_an_error() {
        let clock = ManualClock::new(start());
        let ledger = Ledger::from_transactions(vec![Transaction::new(
            i64::MAX,
            "x",
            1.0,
            TransactionKind::Income,
        )]);
        let err = next_transaction_id(&clock, &ledger).unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
    }
}
