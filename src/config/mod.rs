//! Loader configuration.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use dataset::config::load_project_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let config_dir = temp.path().join(".dataset");
//! fs::create_dir_all(&config_dir).unwrap();
//! fs::write(config_dir.join("config.yml"), "paths:\n  \"*\": [templates]").unwrap();
//!
//! let config = load_project_config(temp.path()).unwrap();
//! assert_eq!(config.paths["*"], vec![temp.path().join("templates")]);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    config_path, find_project_root, load_config_file, load_project_config, parse_config,
    CONFIG_DIR, CONFIG_FILE,
};
pub use schema::{CacheConfig, LoaderConfig};
