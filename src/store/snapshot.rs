// src/store/snapshot.rs
//
// The legacy cache: one full `SearchResult` written as JSON. Still read for
// migration and by the snapshot-diff strategy.

use crate::domain::SearchResult;
use crate::store::PersistenceError;
use std::fs;
use std::path::Path;

/// `None` when there is no snapshot file (or the path is a directory).
pub fn load_snapshot(path: &Path) -> Result<Option<SearchResult>, PersistenceError> {
    if !path.is_file() {
        return Ok(None);
    }

    let bytes = fs::read(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let snapshot = serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Some(snapshot))
}

/// Overwrites the snapshot with `result`.
pub fn save_snapshot(path: &Path, result: &SearchResult) -> Result<(), PersistenceError> {
    let bytes = serde_json::to_vec(result).map_err(|source| PersistenceError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, bytes).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Deletes the snapshot file if there is one.
pub fn remove_snapshot(path: &Path) -> Result<(), PersistenceError> {
    if !path.is_file() {
        return Ok(());
    }

    fs::remove_file(path).map_err(|source| PersistenceError::Remove {
        path: path.to_path_buf(),
        source,
    })
}
