//! Ledger state ownership and the pure services computed from it.

pub mod clock;
pub mod ledger_store;
pub mod services;
pub mod session;

pub use ledger_store::LedgerStore;
pub use session::Session;
