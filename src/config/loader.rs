//! Configuration file discovery and loading.

use crate::config::schema::LoaderConfig;
use crate::error::{DatasetError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".dataset";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `.dataset` directory (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Path of the configuration file for a project root.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<LoaderConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DatasetError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DatasetError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a `LoaderConfig`.
///
/// An empty document is the default configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<LoaderConfig> {
    if content.trim().is_empty() {
        return Ok(LoaderConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| DatasetError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the project configuration with paths resolved against the root.
pub fn load_project_config(project_root: &Path) -> Result<LoaderConfig> {
    let path = config_path(project_root);
    tracing::debug!("Loading configuration from {}", path.display());
    Ok(load_config_file(&path)?.resolve_relative(project_root))
}
