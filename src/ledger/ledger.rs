use serde::{Deserialize, Serialize};

use super::{
    filter::TransactionFilter,
    transaction::{Transaction, TransactionId},
};

/// Authoritative ordered sequence of transactions, oldest first.
///
/// Serializes as a bare JSON array of transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn contains(&self, id: TransactionId) -> bool {
        self.get(id).is_some()
    }

    /// Largest id present, used to keep new ids strictly increasing.
    pub fn max_id(&self) -> Option<TransactionId> {
        self.transactions.iter().map(|txn| txn.id).max()
    }

    /// Lazily yields the entries matching `filter` in ledger order.
    pub fn filtered(
        &self,
        filter: TransactionFilter,
    ) -> impl Iterator<Item = &Transaction> + Clone + '_ {
        self.transactions
            .iter()
            .filter(move |txn| filter.matches(txn))
    }

    pub(crate) fn push(&mut self, transaction: Transaction) -> TransactionId {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    /// Removes the first entry with `id`, keeping the order of the rest.
    pub(crate) fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    pub(crate) fn insert_at(&mut self, index: usize, transaction: Transaction) {
        let index = index.min(self.transactions.len());
        self.transactions.insert(index, transaction);
    }

    pub(crate) fn pop(&mut self) -> Option<Transaction> {
        self.transactions.pop()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
