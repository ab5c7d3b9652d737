//! Template file discovery and reading.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{DatasetError, Result};
use crate::loader::LoadOptions;

/// A template file found in one of the search paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    path: PathBuf,
    local_path: String,
    filename: String,
    modified_at: DateTime<Utc>,
}

impl FileHandle {
    pub fn new(
        path: impl Into<PathBuf>,
        local_path: impl Into<String>,
        filename: impl Into<String>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            path: path.into(),
            local_path: local_path.into(),
            filename: filename.into(),
            modified_at,
        }
    }

    /// Absolute path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory of the file relative to the search path it was found in,
    /// `/`-separated and empty for files at the search root.
    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    /// File name including extension.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Last modification time of the file.
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}

/// Locates template files.
pub trait FileFinder {
    /// Extension of the files this finder looks for, without the dot.
    fn extension(&self) -> &str;

    /// Find the first `filename.extension` in `search_paths`.
    ///
    /// Fails with [`DatasetError::TemplateNotFound`] if no path contains it.
    fn find(
        &self,
        filename: &str,
        extension: &str,
        search_paths: &[PathBuf],
        options: &LoadOptions,
    ) -> Result<FileHandle>;
}

/// Reads the raw content of a located file.
pub trait ContentReader {
    fn content(&self, handle: &FileHandle) -> Result<String>;
}

/// A finder that can also read what it finds.
pub trait Reader: FileFinder + ContentReader {}

impl<T: FileFinder + ContentReader> Reader for T {}

/// Filesystem reader for one file extension.
#[derive(Debug, Clone)]
pub struct FileReader {
    extension: String,
}

impl FileReader {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

/// Whether `filename` stays inside the search root it is joined to.
fn is_contained(filename: &str) -> bool {
    !filename.is_empty()
        && Path::new(filename)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

fn local_path_of(candidate: &Path, root: &Path) -> String {
    candidate
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(|relative| {
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}

impl FileFinder for FileReader {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn find(
        &self,
        filename: &str,
        extension: &str,
        search_paths: &[PathBuf],
        _options: &LoadOptions,
    ) -> Result<FileHandle> {
        let not_found = || DatasetError::TemplateNotFound {
            name: filename.to_string(),
            searched: search_paths.to_vec(),
        };

        if !is_contained(filename) {
            return Err(not_found());
        }

        let file = format!("{}.{}", filename, extension);

        for root in search_paths {
            let candidate = root.join(&file);
            tracing::debug!("Probing {}", candidate.display());

            let metadata = match fs::metadata(&candidate) {
                Ok(metadata) if metadata.is_file() => metadata,
                _ => continue,
            };

            let modified_at = DateTime::<Utc>::from(metadata.modified()?);
            let name = candidate
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.clone());

            return Ok(FileHandle::new(
                candidate.clone(),
                local_path_of(&candidate, root),
                name,
                modified_at,
            ));
        }

        Err(not_found())
    }
}

impl ContentReader for FileReader {
    fn content(&self, handle: &FileHandle) -> Result<String> {
        Ok(fs::read_to_string(handle.path())?)
    }
}
