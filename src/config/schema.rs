//! Loader configuration schema.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::parser::Format;

/// Top-level configuration (`.dataset/config.yml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Definition file format.
    #[serde(default)]
    pub format: Format,

    /// File extension override. Defaults to the format's extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Maximum `extends` chain length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    /// Search paths per namespace; `*` is the wildcard namespace.
    #[serde(default)]
    pub paths: BTreeMap<String, Vec<PathBuf>>,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Cache settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Cache directory. Defaults to the user cache directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl LoaderConfig {
    /// Effective file extension.
    pub fn extension(&self) -> &str {
        self.extension
            .as_deref()
            .unwrap_or_else(|| self.format.extension())
    }

    /// Make relative search and cache paths absolute against `base`.
    pub fn resolve_relative(mut self, base: &Path) -> Self {
        for paths in self.paths.values_mut() {
            for path in paths.iter_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }

        if let Some(dir) = self.cache.dir.as_mut() {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }

        self
    }
}
