use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

use super::transaction::Transaction;

/// View selector narrowing which transactions are listed. Never affects totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionFilter {
    #[default]
    All,
    Income,
    Expenses,
}

impl TransactionFilter {
    pub const ALL: [TransactionFilter; 3] = [
        TransactionFilter::All,
        TransactionFilter::Income,
        TransactionFilter::Expenses,
    ];

    pub fn matches(self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Income => transaction.is_income(),
            TransactionFilter::Expenses => transaction.is_expense(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionFilter::All => "all",
            TransactionFilter::Income => "income",
            TransactionFilter::Expenses => "expenses",
        }
    }
}

impl fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionFilter {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        TransactionFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str() == needle)
            .ok_or_else(|| {
                LedgerError::Validation(format!(
                    "unknown filter `{}` (use all, income, or expenses)",
                    value.trim()
                ))
            })
    }
}

/// Holds the active filter selection.
///
/// Pure state: changing it has no side effects, callers re-query afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterState {
    current: TransactionFilter,
}

impl FilterState {
    pub fn new(current: TransactionFilter) -> Self {
        Self { current }
    }

    pub fn current(&self) -> TransactionFilter {
        self.current
    }

    pub fn set(&mut self, filter: TransactionFilter) {
        self.current = filter;
    }
}
