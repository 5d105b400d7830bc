//! View model handed to renderers: display-ready rows and totals.

use colored::Colorize;

use crate::{
    core::{services::Totals, Session},
    currency::{format_amount, format_signed_amount},
    ledger::{Transaction, TransactionFilter, TransactionId, TransactionKind},
};

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    /// Key for the removal control.
    pub id: TransactionId,
    pub description: String,
    /// Two decimals with an explicit `+` for income.
    pub amount_label: String,
    pub kind: Option<TransactionKind>,
}

impl From<&Transaction> for TransactionRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id,
            description: txn.description.clone(),
            amount_label: format_signed_amount(txn.amount),
            kind: txn.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsView {
    pub income: String,
    pub expenses: String,
    pub balance: String,
}

impl From<Totals> for TotalsView {
    fn from(totals: Totals) -> Self {
        Self {
            income: format_amount(totals.income),
            expenses: format_amount(totals.expenses),
            balance: format_amount(totals.balance),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    pub filter: TransactionFilter,
    pub rows: Vec<TransactionRow>,
    pub totals: TotalsView,
}

impl LedgerView {
    pub fn from_session(session: &Session) -> Self {
        Self {
            filter: session.filter(),
            rows: session.visible().map(TransactionRow::from).collect(),
            totals: session.totals().into(),
        }
    }

    /// Table lines for the visible rows; income green, expenses red.
    pub fn render_rows(&self) -> Vec<String> {
        if self.rows.is_empty() {
            return vec![format!("No transactions to show ({}).", self.filter)];
        }
        let width = self
            .rows
            .iter()
            .map(|row| row.description.chars().count())
            .max()
            .unwrap_or(0)
            .max("Description".len());
        let mut lines = vec![format!(
            "{:<15}  {:<width$}  {:>12}",
            "Id", "Description", "Amount"
        )];
        for row in &self.rows {
            let amount = format!("{:>12}", row.amount_label);
            let amount = match row.kind {
                Some(TransactionKind::Income) => amount.green().to_string(),
                Some(TransactionKind::Expense) => amount.red().to_string(),
                None => amount,
            };
            lines.push(format!(
                "{:<15}  {:<width$}  {}",
                row.id, row.description, amount
            ));
        }
        lines
    }

    pub fn render_totals(&self) -> Vec<String> {
        vec![
            format!("Income:   {}", self.totals.income),
            format!("Expenses: {}", self.totals.expenses),
            format!("Balance:  {}", self.totals.balance),
        ]
    }
}
