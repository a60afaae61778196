//! Flat-file record caching.
//!
//! The cache contract is deliberately crude: the existence of an entry is
//! the sole validity signal. No TTL, no checksum, no partial resume. An
//! entry, once written, is trusted verbatim until someone deletes the file.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;

use crate::traits::RecordCache;

/// Errors from cache backends.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Underlying file I/O failed
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// File-backed cache: one `<key>.json` file per key under a directory.
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Create a cache rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl RecordCache for FileCache {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn put(&self, key: &str, value: &str) -> CacheResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory cache for testing and development.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    /// Create a new empty memory cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of cached entries.
    pub fn entry_count(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

impl RecordCache for MemoryCache {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> CacheResult<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache_dir(test: &str) -> PathBuf {
        std::env::temp_dir().join(format!("spend-report-{}-{}", test, std::process::id()))
    }

    #[test]
    fn test_memory_cache_round_trip() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("customers").unwrap(), None);

        cache.put("customers", "[1, 2]").unwrap();
        assert_eq!(cache.get("customers").unwrap().as_deref(), Some("[1, 2]"));
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn test_file_cache_missing_key() {
        let cache = FileCache::new(temp_cache_dir("missing"));
        assert_eq!(cache.get("customers").unwrap(), None);
    }

    #[test]
    fn test_file_cache_existence_is_trust() {
        let dir = temp_cache_dir("trust");
        let cache = FileCache::new(&dir);

        cache.put("payments", "[]").unwrap();
        assert_eq!(cache.get("payments").unwrap().as_deref(), Some("[]"));

        // A second write is still honored; readers always see the file as-is.
        cache.put("payments", "[{\"id\":\"pi_1\"}]").unwrap();
        assert_eq!(
            cache.get("payments").unwrap().as_deref(),
            Some("[{\"id\":\"pi_1\"}]")
        );

        fs::remove_dir_all(dir).unwrap();
    }
}
