//! Error types for template loading.
//!
//! This module defines [`DatasetError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Template discovery and inheritance errors abort a load immediately
//! - Cache failures never surface here; the loader logs them and re-parses
//! - Use `anyhow::Error` (via `DatasetError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for template loading.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// No file matches the template name in any search path of its namespace.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String, searched: Vec<PathBuf> },

    /// A template extends a template already in its inheritance chain.
    #[error("Recursive extending found in [{reference}] ({chain})")]
    RecursiveExtend { reference: String, chain: String },

    /// Inheritance chain is deeper than the loader allows.
    #[error("Extends chain of '{name}' exceeds maximum depth of {max_depth}")]
    ExtendDepthExceeded { name: String, max_depth: usize },

    /// Parsed content does not describe a valid template.
    #[error("Invalid template definition at {path}: {message}")]
    InvalidDefinition { path: PathBuf, message: String },

    /// Raw content could not be parsed.
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    /// Loader configuration file not found.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the loader configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for template operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
