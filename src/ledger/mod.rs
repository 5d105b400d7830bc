//! Ledger domain models: transactions, the ordered ledger, and filter selection.

pub mod filter;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use filter::{FilterState, TransactionFilter};
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionId, TransactionKind};
