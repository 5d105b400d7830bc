#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger keeps an ordered list of income and expense entries, derives
//! filtered views and totals from it, and persists the list as a single text
//! blob in an expiring key-value store.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pocket Ledger tracing initialized.");
    });
}
