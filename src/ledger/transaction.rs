use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Creation timestamp in Unix milliseconds, unique within a ledger.
pub type TransactionId = i64;

/// A single income or expense entry.
///
/// The sign of `amount` carries the kind: positive is income, negative is an
/// expense. Entries are never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: f64,
}

impl Transaction {
    /// Builds an entry from a positive raw amount, negating it for expenses.
    pub fn new(
        id: TransactionId,
        description: impl Into<String>,
        raw_amount: f64,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount: kind.signed(raw_amount),
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns the kind implied by the sign, or `None` for a zero amount.
    pub fn kind(&self) -> Option<TransactionKind> {
        if self.is_income() {
            Some(TransactionKind::Income)
        } else if self.is_expense() {
            Some(TransactionKind::Expense)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Applies the sign convention to a positive raw amount.
    pub fn signed(self, raw_amount: f64) -> f64 {
        match self {
            TransactionKind::Income => raw_amount,
            TransactionKind::Expense => -raw_amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" | "expenses" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::Validation(format!(
                "unknown transaction type `{}` (use income or expense)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_amounts_are_negated() {
        let rent = Transaction::new(1, "Rent", 400.0, TransactionKind::Expense);
        assert_eq!(rent.amount, -400.0);
        assert!(rent.is_expense());
        assert_eq!(rent.kind(), Some(TransactionKind::Expense));

        let salary = Transaction::new(2, "Salary", 1000.0, TransactionKind::Income);
        assert_eq!(salary.amount, 1000.0);
        assert!(salary.is_income());
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert_eq!(" EXPENSE ".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let txn = Transaction::new(1700000000000, "Coffee", 3.5, TransactionKind::Expense);
        let json = serde_json::to_string(&txn).unwrap();
        assert_eq!(
            json,
            r#"{"id":1700000000000,"description":"Coffee","amount":-3.5}"#
        );
    }
}
