//! Parsed template caching.
//!
//! Parsed templates are cached under a key derived from their namespace and
//! file location. An entry is only valid while it is at least as new as the
//! source file it was built from.

pub mod memory;
pub mod payload;
pub mod store;

pub use memory::MemoryCache;
pub use payload::{decode, encode, PayloadError, PAYLOAD_VERSION};
pub use store::FileCache;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::name::WILDCARD;
use crate::reader::FileHandle;

/// Separator between cache key components.
pub const KEY_SEPARATOR: &str = "/";

/// Key/value store for serialized templates.
pub trait TemplateCache {
    /// Whether an entry exists for `key` that is not older than `reference`.
    fn has(&self, key: &str, reference: DateTime<Utc>) -> bool;

    /// Read the payload stored under `key`.
    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>>;

    /// Store a payload under `key`, replacing any previous entry.
    fn set(&self, key: &str, payload: &[u8]) -> anyhow::Result<()>;

    /// Remove the entry for `key`. Returns whether one existed.
    fn unset(&self, key: &str) -> anyhow::Result<bool>;
}

impl<C: TemplateCache + ?Sized> TemplateCache for Arc<C> {
    fn has(&self, key: &str, reference: DateTime<Utc>) -> bool {
        (**self).has(key, reference)
    }

    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, payload: &[u8]) -> anyhow::Result<()> {
        (**self).set(key, payload)
    }

    fn unset(&self, key: &str) -> anyhow::Result<bool> {
        (**self).unset(key)
    }
}

/// Build the cache key for a template file.
///
/// The wildcard namespace contributes nothing; any other namespace is a
/// leading component. The search root that matched is not part of the key.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use dataset::cache::cache_key;
/// use dataset::reader::FileHandle;
///
/// let handle = FileHandle::new("/srv/templates/forms/user.yml", "forms", "user.yml", Utc::now());
/// assert_eq!(cache_key("admin", &handle), "admin/forms/user.yml");
/// assert_eq!(cache_key("*", &handle), "forms/user.yml");
/// ```
pub fn cache_key(namespace: &str, handle: &FileHandle) -> String {
    let prefix = if namespace == WILDCARD {
        String::new()
    } else {
        format!("{}{}", namespace, KEY_SEPARATOR)
    };

    format!(
        "{}{}{}{}",
        prefix,
        handle.local_path(),
        KEY_SEPARATOR,
        handle.filename()
    )
}

/// Get the default cache directory.
pub fn default_cache_dir() -> std::path::PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("dataset")
        .join("templates")
}
