//! File-backed cache storage.
//!
//! Each key maps to one file under the cache root. The file's modification
//! time is the entry's timestamp; there is no separate metadata record.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::TemplateCache;

/// Storage for cached templates.
#[derive(Debug, Clone)]
pub struct FileCache {
    /// Root directory for cache.
    root: PathBuf,
}

impl FileCache {
    /// Create a new file cache.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the cache directory exists.
    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create cache directory {:?}", self.root))
    }

    /// Get the path storing the entry for `key`.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let hash = Sha256::digest(key.as_bytes());
        let hash_str = hex::encode(&hash[..16]);
        self.root.join(hash_str)
    }

    /// Timestamp of the entry for `key`, if present.
    pub fn stored_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let metadata = fs::metadata(self.entry_path(key)).ok()?;
        if !metadata.is_file() {
            return None;
        }
        metadata.modified().ok().map(DateTime::<Utc>::from)
    }

    /// Remove every entry. Returns the number removed.
    ///
    /// Only files named like an entry are removed; anything else sharing the
    /// cache root is left alone.
    pub fn clear(&self) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }

        let mut count = 0;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && is_entry_file(&path) {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove cache entry {:?}", path))?;
                count += 1;
            }
        }

        Ok(count)
    }
}

/// Entry files are named by 16 hash bytes in lowercase hex.
fn is_entry_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            name.len() == 32
                && name
                    .bytes()
                    .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        })
}

impl TemplateCache for FileCache {
    fn has(&self, key: &str, reference: DateTime<Utc>) -> bool {
        self.stored_at(key)
            .is_some_and(|stored_at| stored_at >= reference)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.entry_path(key);
        fs::read(&path).with_context(|| format!("Failed to read cached template from {:?}", path))
    }

    fn set(&self, key: &str, payload: &[u8]) -> Result<()> {
        self.ensure_dir()?;
        let path = self.entry_path(key);
        fs::write(&path, payload)
            .with_context(|| format!("Failed to write cached template to {:?}", path))
    }

    fn unset(&self, key: &str) -> Result<bool> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        Ok(true)
    }
}
