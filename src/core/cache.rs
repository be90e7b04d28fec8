//! Per-file content digest cache
//!
//! Entries are keyed by absolute path and are never evicted or refreshed: once a
//! file has been hashed, later lookups return the stored digest without touching
//! the filesystem again. That is only sound while the files do not change, i.e.
//! for a short-lived process. A long-lived service must call [`FileHashCache::clear`]
//! (or drop the cache) whenever it learns that files may have changed.

use crate::error::{DepsError, Result};
use crate::utils::fs::FileSystem;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// SHA-256 digest of a file's bytes
pub type FileDigest = [u8; 32];

/// Digest of `bytes`; depends on nothing but the bytes themselves
pub fn digest_bytes(bytes: &[u8]) -> FileDigest {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

/// Thread-safe, append-only map from absolute path to content digest
#[derive(Debug, Default)]
pub struct FileHashCache {
    digests: DashMap<PathBuf, FileDigest>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    /// Share of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl FileHashCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached digest
    pub fn get(&self, path: &Path) -> Option<FileDigest> {
        self.digests.get(path).map(|entry| *entry.value())
    }

    /// Digest of the file at `path`, reading and hashing it on first use.
    ///
    /// Two callers racing on the same path may both hash the file; both compute
    /// the same value, so whichever insert lands last is harmless.
    pub fn digest<F: FileSystem + ?Sized>(&self, fs: &F, path: &Path) -> Result<FileDigest> {
        if let Some(digest) = self.get(path) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(digest);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let bytes = fs
            .read_file(path)
            .map_err(|e| DepsError::read_error(path, e))?;
        let digest = digest_bytes(&bytes);
        self.digests.insert(path.to_path_buf(), digest);
        Ok(digest)
    }

    /// Drop every entry; the only way entries ever leave the cache
    pub fn clear(&self) {
        self.digests.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Get the number of cached entries
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
