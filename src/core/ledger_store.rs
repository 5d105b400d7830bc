use std::sync::Arc;

use crate::{
    core::{
        clock::{next_transaction_id, Clock, SystemClock},
        services::{ServiceError, SummaryService, Totals, TransactionDraft, TransactionService},
    },
    errors::{LedgerError, Result},
    ledger::{Ledger, Transaction, TransactionFilter, TransactionId, TransactionKind},
    storage::{LedgerPersistence, LoadStatus},
};

/// Owns the authoritative ledger and writes it through to storage on every
/// mutation.
///
/// A failed write rolls the in-memory change back, so the ledger held here
/// always matches what was last persisted.
pub struct LedgerStore {
    ledger: Ledger,
    persistence: LedgerPersistence,
    clock: Arc<dyn Clock>,
    load_status: LoadStatus,
    load_warnings: Vec<String>,
}

impl LedgerStore {
    /// Loads the saved ledger (or starts empty) using the system clock for ids.
    pub fn open(persistence: LedgerPersistence) -> Self {
        Self::open_with_clock(persistence, Arc::new(SystemClock))
    }

    pub fn open_with_clock(persistence: LedgerPersistence, clock: Arc<dyn Clock>) -> Self {
        let report = persistence.load_report();
        Self {
            ledger: report.ledger,
            persistence,
            clock,
            load_status: report.status,
            load_warnings: report.warnings,
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn persistence(&self) -> &LedgerPersistence {
        &self.persistence
    }

    /// Appends a new entry and persists the ledger.
    ///
    /// `amount` is the positive raw amount; expenses are stored negated.
    pub fn add(
        &mut self,
        description: &str,
        amount: f64,
        kind: TransactionKind,
    ) -> Result<TransactionId> {
        TransactionService::validate(description, amount).map_err(into_ledger_error)?;

        let id = next_transaction_id(self.clock.as_ref(), &self.ledger)?;
        self.ledger
            .push(Transaction::new(id, description, amount, kind));

        if let Err(err) = self.persistence.save(&self.ledger) {
            self.ledger.pop();
            tracing::error!(id, error = %err, "failed to persist new transaction; rolled back");
            return Err(err);
        }
        tracing::info!(id, %kind, amount, "transaction added");
        Ok(id)
    }

    pub fn add_draft(&mut self, draft: &TransactionDraft) -> Result<TransactionId> {
        self.add(&draft.description, draft.amount, draft.kind)
    }

    /// Removes the entry with `id`. An unknown id is not an error.
    pub fn remove(&mut self, id: TransactionId) -> Result<Option<Transaction>> {
        let index = self.ledger.iter().position(|txn| txn.id == id);
        let removed = self.ledger.remove(id);

        if let Err(err) = self.persistence.save(&self.ledger) {
            if let (Some(index), Some(txn)) = (index, removed) {
                self.ledger.insert_at(index, txn);
            }
            tracing::error!(id, error = %err, "failed to persist removal; rolled back");
            return Err(err);
        }

        match &removed {
            Some(_) => tracing::info!(id, "transaction removed"),
            None => tracing::debug!(id, "remove ignored unknown transaction id"),
        }
        Ok(removed)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.ledger.get(id)
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    pub fn filtered(
        &self,
        filter: TransactionFilter,
    ) -> impl Iterator<Item = &Transaction> + Clone + '_ {
        SummaryService::filtered(&self.ledger, filter)
    }

    pub fn totals(&self) -> Totals {
        SummaryService::totals(&self.ledger)
    }
}

fn into_ledger_error(err: ServiceError) -> LedgerError {
    match err {
        ServiceError::Ledger(inner) => inner,
        ServiceError::Invalid(message) => LedgerError::Validation(message),
    }
}
