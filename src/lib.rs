//! Dataset - Namespaced template loading.
//!
//! Templates are structured documents stored as files in per-namespace
//! search paths. A template is referenced as `namespace::name` (or just
//! `name` for the wildcard namespace `*`), parsed into a [`Template`],
//! optionally cached keyed by the file's modification time, and merged with
//! the template it `extends`.
//!
//! # Modules
//!
//! - [`cache`] - Cache trait, file and memory stores, payload codec
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Loader configuration loading
//! - [`error`] - Error types and result aliases
//! - [`loader`] - The load pipeline
//! - [`name`] - Template reference resolution
//! - [`parser`] - Raw content parsers
//! - [`paths`] - Namespace search paths
//! - [`reader`] - Template file discovery and reading
//! - [`template`] - Template document model and inheritance
//!
//! # Example
//!
//! ```
//! use dataset::name::resolve;
//!
//! assert_eq!(resolve("admin::users"), ("admin".to_string(), "users".to_string()));
//! ```
//!
//! For file-based loading, see [`loader`] and the integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod name;
pub mod parser;
pub mod paths;
pub mod reader;
pub mod template;

pub use error::{DatasetError, Result};
pub use loader::{LoadOptions, TemplateLoader};
pub use template::Template;
