use crate::{
    core::{
        ledger_store::LedgerStore,
        services::{ServiceResult, SummaryService, Totals, TransactionService},
    },
    ledger::{FilterState, Transaction, TransactionFilter, TransactionId},
};

/// Explicit context for one user session: the ledger store plus the active
/// filter. Replaces process-wide mutable state.
pub struct Session {
    store: LedgerStore,
    filter: FilterState,
}

impl Session {
    pub fn new(store: LedgerStore) -> Self {
        Self {
            store,
            filter: FilterState::default(),
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn filter(&self) -> TransactionFilter {
        self.filter.current()
    }

    /// Validates raw form input and records the transaction.
    ///
    /// Rejected input leaves the ledger untouched.
    pub fn submit_transaction(
        &mut self,
        description: &str,
        amount: &str,
        kind: &str,
    ) -> ServiceResult<TransactionId> {
        let draft = TransactionService::parse_submission(description, amount, kind)?;
        Ok(self.store.add_draft(&draft)?)
    }

    pub fn delete_transaction(&mut self, id: TransactionId) -> ServiceResult<Option<Transaction>> {
        Ok(self.store.remove(id)?)
    }

    pub fn select_filter(&mut self, filter: TransactionFilter) {
        self.filter.set(filter);
        tracing::debug!(%filter, "filter selected");
    }

    /// Entries visible under the active filter.
    pub fn visible(&self) -> impl Iterator<Item = &Transaction> + Clone + '_ {
        self.store.filtered(self.filter.current())
    }

    pub fn totals(&self) -> Totals {
        SummaryService::totals(self.store.ledger())
    }
}
