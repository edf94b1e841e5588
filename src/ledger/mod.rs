//! Financial records, the ledger that owns them, and balance aggregates.

pub mod balance;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod record;

pub use balance::{Balance, BalanceStatus};
pub use ledger::{CorruptFilePolicy, Ledger, LoadReport, LoadStatus};
pub use record::{Record, RecordKind, StoredRecord, DATE_FORMAT};
