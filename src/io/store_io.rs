//! Whole-file persistence for the entry store.
//!
//! The file is the magic `GLI\x01` followed by the bincode encoding of the
//! entry list. An empty file is a valid empty store. Writes truncate and
//! rewrite the file in place, so a crash mid-write can leave it truncated;
//! bincode then fails with an unexpected end of input on the next read.
//! There is no locking: two concurrent invocations can lose an update.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::model::entry::Entry;

const MAGIC: &[u8; 4] = b"GLI\x01";

/// Error type for store I/O operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not a valid task file: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("could not encode tasks: {0}")]
    Encode(#[from] bincode::Error),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read every entry from `path`, creating an empty file if it doesn't exist.
///
/// An existing file is only opened for reading.
pub fn read_entries(path: &Path) -> Result<Vec<Entry>, StoreError> {
    if !path.exists() {
        ensure_parent(path)?;
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(io_err(path))?;
    }

    let bytes = fs::read(path).map_err(io_err(path))?;
    if bytes.is_empty() {
        tracing::debug!(path = %path.display(), "store is empty");
        return Ok(Vec::new());
    }

    let entries = decode(&bytes).map_err(|reason| StoreError::Decode {
        path: path.to_path_buf(),
        reason,
    })?;
    tracing::debug!(path = %path.display(), count = entries.len(), "read store");
    Ok(entries)
}

/// Overwrite `path` with `entries`, creating the file if needed.
pub fn write_entries(path: &Path, entries: &[Entry]) -> Result<(), StoreError> {
    let bytes = encode(entries)?;
    ensure_parent(path)?;
    let mut file = File::create(path).map_err(io_err(path))?;
    file.write_all(&bytes).map_err(io_err(path))?;
    file.flush().map_err(io_err(path))?;
    tracing::debug!(path = %path.display(), count = entries.len(), "wrote store");
    Ok(())
}

/// Return `entries` without the element at `index`, keeping the order of the rest.
///
/// Panics if `index` is out of bounds; callers validate the index first.
pub fn remove_at(mut entries: Vec<Entry>, index: usize) -> Vec<Entry> {
    entries.remove(index);
    entries
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            fs::create_dir_all(dir).map_err(io_err(dir))
        }
        _ => Ok(()),
    }
}

fn encode(entries: &[Entry]) -> Result<Vec<u8>, StoreError> {
    let mut bytes = MAGIC.to_vec();
    bytes.extend(bincode::serialize(entries)?);
    Ok(bytes)
}

fn decode(bytes: &[u8]) -> Result<Vec<Entry>, String> {
    let payload = bytes
        .strip_prefix(MAGIC.as_slice())
        .ok_or_else(|| "unrecognized file signature".to_string())?;
    bincode::deserialize(payload).map_err(|e| e.to_string())
}
