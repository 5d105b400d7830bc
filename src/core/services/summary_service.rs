//! Derived views over a ledger: filtered listings and aggregate totals.

use serde::Serialize;

use crate::ledger::{Ledger, Transaction, TransactionFilter};

/// Aggregates over the entire ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    /// Sum of positive amounts.
    pub income: f64,
    /// Sum of the absolute values of negative amounts.
    pub expenses: f64,
    /// Sum of all signed amounts.
    pub balance: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Entries matching `filter`, in ledger order. Calling again restarts the view.
    pub fn filtered(
        ledger: &Ledger,
        filter: TransactionFilter,
    ) -> impl Iterator<Item = &Transaction> + Clone + '_ {
        ledger.filtered(filter)
    }

    /// Totals are always computed from the full ledger, whatever filter is active.
    pub fn totals(ledger: &Ledger) -> Totals {
        ledger.iter().fold(Totals::default(), |mut totals, txn| {
            if txn.is_income() {
                totals.income += txn.amount;
            } else if txn.is_expense() {
                totals.expenses += txn.amount.abs();
            }
            totals.balance += txn.amount;
            totals
        })
    }

    /// Number of income and expense entries.
    pub fn counts(ledger: &Ledger) -> (usize, usize) {
        let income = ledger.filtered(TransactionFilter::Income).count();
        let expenses = ledger.filtered(TransactionFilter::Expenses).count();
        (income, expenses)
    }
}
