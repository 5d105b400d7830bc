#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use pocket_ledger::{
    core::{clock::ManualClock, LedgerStore, Session},
    storage::{JsonFileStore, LedgerPersistence},
};
use tempfile::TempDir;

/// Keeps TempDir guards alive until the test binary exits.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn fixed_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
    ))
}

/// Session over a JSON file store in `dir`, sharing `clock` for ids and expiry.
pub fn session_in(dir: &std::path::Path, clock: Arc<ManualClock>) -> Session {
    let store = JsonFileStore::with_clock(dir.join("store.json"), clock.clone())
        .expect("create json store");
    let persistence = LedgerPersistence::new(Box::new(store));
    Session::new(LedgerStore::open_with_clock(persistence, clock))
}
