use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::Result, ledger::StoredRecord};

const TMP_SUFFIX: &str = "tmp";
const QUARANTINE_SUFFIX: &str = "corrupt";
const QUARANTINE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// On-disk document holding both record sequences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub plans: Vec<StoredRecord>,
    #[serde(default)]
    pub trash_bin: Vec<StoredRecord>,
}

/// Writes the snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot_to_path(snapshot: &LedgerSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    write_atomic(path, &json)
}

/// Reads a snapshot, returning `Ok(None)` when the file does not exist.
pub fn load_snapshot_from_path(path: &Path) -> Result<Option<LedgerSnapshot>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

/// Moves an unreadable file aside so a later save cannot overwrite it.
pub fn quarantine(path: &Path) -> Result<PathBuf> {
    let stamp = Utc::now().format(QUARANTINE_TIMESTAMP_FORMAT);
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("ledger");
    let stem = format!("{file_name}.{QUARANTINE_SUFFIX}-{stamp}");
    let mut target = path.with_file_name(&stem);
    let mut attempt = 1;
    while target.exists() {
        target = path.with_file_name(format!("{stem}-{attempt}"));
        attempt += 1;
    }
    fs::rename(path, &target)?;
    Ok(target)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Stages `data` next to `path` and renames it into place, so readers only
/// ever observe the old or the new contents.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    if let Err(err) = stage(&tmp, data) {
        if tmp.is_file() {
            let _ = fs::remove_file(&tmp);
        }
        return Err(err);
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn stage(tmp: &Path, data: &str) -> Result<()> {
    let mut file = File::create(tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
