//! In-process cache storage.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::TemplateCache;

/// Cache entries kept in memory, stamped with their storage time.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (Vec<u8>, DateTime<Utc>)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, (Vec<u8>, DateTime<Utc>)>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store a payload with an explicit timestamp.
    pub fn set_at(&self, key: &str, payload: &[u8], stored_at: DateTime<Utc>) {
        self.entries()
            .insert(key.to_string(), (payload.to_vec(), stored_at));
    }

    /// Timestamp of the entry for `key`, if present.
    pub fn stored_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries().get(key).map(|(_, stored_at)| *stored_at)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl TemplateCache for MemoryCache {
    fn has(&self, key: &str, reference: DateTime<Utc>) -> bool {
        self.stored_at(key)
            .is_some_and(|stored_at| stored_at >= reference)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.entries()
            .get(key)
            .map(|(payload, _)| payload.clone())
            .ok_or_else(|| anyhow!("No cached template for key '{}'", key))
    }

    fn set(&self, key: &str, payload: &[u8]) -> Result<()> {
        self.set_at(key, payload, Utc::now());
        Ok(())
    }

    fn unset(&self, key: &str) -> Result<bool> {
        Ok(self.entries().remove(key).is_some())
    }
}
