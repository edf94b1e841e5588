use std::path::PathBuf;

use chrono::NaiveDate;
use finance_tracker::ledger::{Ledger, LoadStatus};
use tempfile::TempDir;

/// Opens an empty ledger in its own temporary directory. Keep the `TempDir`
/// alive for as long as the ledger is used.
#[allow(dead_code)]
pub fn fresh_ledger() -> (Ledger, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let (ledger, report) = Ledger::open(data_path(&temp));
    assert!(
        matches!(report.status, LoadStatus::Fresh),
        "unexpected load status: {:?}",
        report.status
    );
    (ledger, temp)
}

pub fn data_path(temp: &TempDir) -> PathBuf {
    temp.path().join("financial_data.json")
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
