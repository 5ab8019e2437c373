// src/store/identity_store.rs

use crate::domain::{IgnoredListingKey, KnownListings, Listing, SearchResult};
use crate::store::{load_snapshot, remove_snapshot, PersistenceError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Keys of every listing that has already been reported.
///
/// Stored as a JSON array of `{name, address}` objects. The set only grows;
/// nothing here ever removes a key.
#[derive(Debug)]
pub struct IdentityStore {
    path: PathBuf,
    keys: Vec<IgnoredListingKey>,
    index: HashSet<IgnoredListingKey>,
    initialized: bool,
}

impl IdentityStore {
    /// Reads the store at `path`.
    ///
    /// A missing file, a directory in its place, or `refresh` all start over
    /// from an empty set, which is written out before returning.
    pub fn load(path: impl Into<PathBuf>, refresh: bool) -> Result<Self, PersistenceError> {
        let path = path.into();

        if refresh || !path.is_file() {
            if path.is_dir() {
                fs::remove_dir(&path).map_err(|source| PersistenceError::Remove {
                    path: path.clone(),
                    source,
                })?;
            }

            let store = Self {
                path,
                keys: Vec::new(),
                index: HashSet::new(),
                initialized: true,
            };
            store.persist()?;
            info!(path = %store.path.display(), refresh, "Initialized identity store");
            return Ok(store);
        }

        let bytes = fs::read(&path).map_err(|source| PersistenceError::Read {
            path: path.clone(),
            source,
        })?;
        let stored: Vec<IgnoredListingKey> =
            serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Decode {
                path: path.clone(),
                source,
            })?;

        let mut store = Self {
            path,
            keys: Vec::with_capacity(stored.len()),
            index: HashSet::with_capacity(stored.len()),
            initialized: false,
        };
        store.append(stored);
        debug!(keys = store.len(), "Loaded identity store");

        Ok(store)
    }

    /// True when `load` had to create the store from scratch.
    pub fn was_initialized(&self) -> bool {
        self.initialized
    }

    /// Adds every listing of a legacy snapshot and persists.
    ///
    /// Only a freshly initialized store accepts a migration; on any other
    /// store this is a no-op returning 0.
    pub fn migrate_from(&mut self, legacy: &SearchResult) -> Result<usize, PersistenceError> {
        if !self.initialized {
            return Ok(0);
        }

        let added = self.append(legacy.listings.iter().map(Listing::key));
        self.persist()?;
        Ok(added)
    }

    pub fn contains(&self, key: &IgnoredListingKey) -> bool {
        self.index.contains(key)
    }

    /// Adds keys not already present. Returns how many were new.
    pub fn append<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = IgnoredListingKey>,
    {
        let mut added = 0;
        for key in keys {
            if self.index.insert(key.clone()) {
                self.keys.push(key);
                added += 1;
            }
        }
        added
    }

    /// Writes the whole set, not a delta.
    pub fn persist(&self) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec(&self.keys).map_err(|source| PersistenceError::Encode {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, bytes).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[cfg(test)]
    pub fn keys(&self) -> &[IgnoredListingKey] {
        &self.keys
    }
}

impl KnownListings for IdentityStore {
    fn contains(&self, key: &IgnoredListingKey) -> bool {
        IdentityStore::contains(self, key)
    }
}

/// Loads the store and, if it was just created, folds in the legacy
/// snapshot at `legacy_path` and deletes that file.
///
/// `refresh` starts from an empty set and never migrates: the snapshot is
/// left alone and every listing counts as new.
pub fn open_identity_store(
    store_path: &Path,
    legacy_path: &Path,
    refresh: bool,
) -> Result<IdentityStore, PersistenceError> {
    let mut store = IdentityStore::load(store_path, refresh)?;

    if store.was_initialized() && !refresh {
        if let Some(legacy) = load_snapshot(legacy_path)? {
            let added = store.migrate_from(&legacy)?;
            remove_snapshot(legacy_path)?;
            info!(added, "Migrated legacy snapshot into identity store");
        }
    }

    Ok(store)
}
