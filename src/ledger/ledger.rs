use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{
    balance::Balance,
    record::{Record, StoredRecord},
};
use crate::{
    errors::{LedgerError, Result},
    utils::persistence::{self, LedgerSnapshot},
};

/// What to do with a data file that exists but cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptFilePolicy {
    /// Rename the file to `<name>.corrupt-<timestamp>` before starting empty.
    #[default]
    Quarantine,
    /// Leave the file where it is; the next save replaces it.
    Overwrite,
}

#[derive(Debug)]
pub enum LoadStatus {
    /// No file existed; the ledger starts empty.
    Fresh,
    Loaded,
    /// The file could not be read. The ledger starts empty and, when
    /// quarantined, the original bytes survive at the given path.
    Recovered {
        error: LedgerError,
        quarantined: Option<PathBuf>,
    },
}

/// Outcome of opening a ledger, for the caller to report.
#[derive(Debug)]
pub struct LoadReport {
    pub path: PathBuf,
    pub status: LoadStatus,
}

impl LoadReport {
    pub fn error(&self) -> Option<&LedgerError> {
        match &self.status {
            LoadStatus::Recovered { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn quarantined(&self) -> Option<&Path> {
        match &self.status {
            LoadStatus::Recovered { quarantined, .. } => quarantined.as_deref(),
            _ => None,
        }
    }
}

/// Active records plus the trash bin, persisted as a whole after every change.
///
/// The ledger assumes it is the only writer of its file; nothing locks it.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    path: PathBuf,
    active: Vec<Record>,
    trash: Vec<Record>,
}

impl Ledger {
    /// Opens the ledger stored at `path`, falling back to an empty ledger when
    /// the file is missing or unreadable. Unreadable files are quarantined.
    pub fn open(path: impl Into<PathBuf>) -> (Self, LoadReport) {
        Self::open_with_policy(path, CorruptFilePolicy::default())
    }

    pub fn open_with_policy(
        path: impl Into<PathBuf>,
        policy: CorruptFilePolicy,
    ) -> (Self, LoadReport) {
        let path = path.into();
        let status = match Self::read(&path) {
            Ok(Some(ledger)) => {
                info!(
                    path = %path.display(),
                    active = ledger.active.len(),
                    trash = ledger.trash.len(),
                    "ledger loaded"
                );
                return (
                    ledger,
                    LoadReport {
                        path,
                        status: LoadStatus::Loaded,
                    },
                );
            }
            Ok(None) => {
                info!(path = %path.display(), "no ledger file found, starting empty");
                LoadStatus::Fresh
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "ledger file unreadable, starting empty");
                let quarantined = match policy {
                    CorruptFilePolicy::Quarantine => match persistence::quarantine(&path) {
                        Ok(moved) => {
                            warn!(moved_to = %moved.display(), "unreadable ledger file quarantined");
                            Some(moved)
                        }
                        Err(err) => {
                            warn!(error = %err, "could not quarantine unreadable ledger file");
                            None
                        }
                    },
                    CorruptFilePolicy::Overwrite => None,
                };
                LoadStatus::Recovered { error, quarantined }
            }
        };
        (Self::empty(path.clone()), LoadReport { path, status })
    }

    /// Opens the ledger at `path`, propagating any read or format error.
    /// A missing file still yields an empty ledger.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        Ok(Self::read(&path)?.unwrap_or_else(|| Self::empty(path)))
    }

    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            active: Vec::new(),
            trash: Vec::new(),
        }
    }

    fn read(path: &Path) -> Result<Option<Self>> {
        let Some(snapshot) = persistence::load_snapshot_from_path(path)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            path: path.to_path_buf(),
            active: decode_section("plans", snapshot.plans)?,
            trash: decode_section("trash_bin", snapshot.trash_bin)?,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record and persists. If the write fails the record stays in
    /// memory and the error is returned.
    pub fn add_record(&mut self, record: Record) -> Result<()> {
        debug!(description = record.description(), kind = %record.kind(), "adding record");
        self.active.push(record);
        self.save()
    }

    /// Active records in insertion order; position `n` is record number `n + 1`.
    pub fn list_active(&self) -> &[Record] {
        &self.active
    }

    pub fn list_trash(&self) -> &[Record] {
        &self.trash
    }

    /// Moves the record at 1-based `index` into the trash bin and returns it.
    pub fn delete_by_index(&mut self, index: usize) -> Result<Record> {
        let len = self.active.len();
        if index == 0 || index > len {
            return Err(LedgerError::Range { index, len });
        }
        let record = self.active.remove(index - 1);
        info!(index, description = record.description(), "record moved to trash");
        self.trash.push(record.clone());
        self.save()?;
        Ok(record)
    }

    /// Totals over active records only; the trash bin never counts.
    pub fn compute_balance(&self) -> Balance {
        Balance::from_records(&self.active)
    }

    /// Expenses that carry a due date, earliest first. Due dates compare as
    /// text and equal dates keep insertion order.
    pub fn upcoming_due(&self) -> Vec<&Record> {
        let mut due: Vec<&Record> = self
            .active
            .iter()
            .filter(|record| record.is_expense() && record.due_date().is_some())
            .collect();
        due.sort_by(|a, b| a.due_date().cmp(&b.due_date()));
        due
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            plans: self.active.iter().map(StoredRecord::from).collect(),
            trash_bin: self.trash.iter().map(StoredRecord::from).collect(),
        }
    }

    /// Rewrites the whole ledger file.
    pub fn save(&self) -> Result<()> {
        persistence::save_snapshot_to_path(&self.snapshot(), &self.path).map_err(|err| {
            warn!(path = %self.path.display(), error = %err, "ledger save failed");
            err
        })?;
        debug!(path = %self.path.display(), "ledger saved");
        Ok(())
    }

    /// Writes a copy of the current state to `target` without changing where
    /// the ledger itself is saved.
    pub fn export_to(&self, target: &Path) -> Result<()> {
        persistence::save_snapshot_to_path(&self.snapshot(), target)?;
        info!(target = %target.display(), "ledger exported");
        Ok(())
    }
}

fn decode_section(section: &'static str, entries: Vec<StoredRecord>) -> Result<Vec<Record>> {
    entries
        .into_iter()
        .enumerate()
        .map(|(position, stored)| {
            Record::try_from(stored).map_err(|err| {
                LedgerError::format(section, format!("entry {}: {err}", position + 1))
            })
        })
        .collect()
}
