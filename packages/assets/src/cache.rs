//! Load-once file cache.
//!
//! Entries are keyed by path and remember the file's modification time at
//! load. A lookup whose file still has the same modification time is a hit;
//! anything else reloads. Nothing is ever evicted: the deck only touches a
//! handful of files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

struct CacheEntry<T> {
    modified: Option<SystemTime>,
    value: Arc<T>,
}

/// Memoizes values derived from files.
pub struct FileCache<T> {
    entries: Mutex<BTreeMap<PathBuf, CacheEntry<T>>>,
}

impl<T> Default for FileCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FileCache<T> {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the cached value for `path`, calling `load` on a miss or when
    /// the file has changed since it was cached.
    ///
    /// Failed loads are not cached.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `load`.
    pub fn get_or_load<E>(
        &self,
        path: &Path,
        load: impl FnOnce(&Path) -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        let modified = modified_at(path);

        {
            let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = entries.get(path)
                && entry.modified == modified
            {
                log::trace!("Cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.value));
            }
        }

        log::debug!("Loading {} into cache", path.display());
        let value = Arc::new(load(path)?);

        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                path.to_path_buf(),
                CacheEntry {
                    modified,
                    value: Arc::clone(&value),
                },
            );

        Ok(value)
    }

    /// Drops the entry for `path`, if any.
    pub fn invalidate(&self, path: &Path) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
