//! Cache command implementation.
//!
//! Provides `dataset cache clear` and `dataset cache unset <name>`.

use clap::{Args, Subcommand};
use std::io::Write;

use crate::cache::{default_cache_dir, FileCache, TemplateCache};
use crate::config::LoaderConfig;
use crate::error::Result;
use crate::loader::{LoadOptions, TemplateLoader};

use super::dispatcher::{Command, CommandResult};

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Remove every cached template.
    Clear,
    /// Invalidate the cached entry of one template.
    Unset {
        /// Template reference (`name` or `namespace::name`)
        name: String,
    },
}

/// The cache command implementation.
pub struct CacheCommand {
    config: LoaderConfig,
    args: CacheArgs,
}

impl CacheCommand {
    /// Create a new cache command.
    pub fn new(config: LoaderConfig, args: CacheArgs) -> Self {
        Self { config, args }
    }

    fn store(&self) -> FileCache {
        FileCache::new(
            self.config
                .cache
                .dir
                .clone()
                .unwrap_or_else(default_cache_dir),
        )
    }
}

impl Command for CacheCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        match &self.args.command {
            CacheSubcommand::Clear => {
                if !self.config.cache.enabled {
                    writeln!(out, "Caching is disabled")?;
                    return Ok(CommandResult::failure(1));
                }
                let cleared = self.store().clear()?;
                writeln!(out, "Cleared {} entries", cleared)?;
                Ok(CommandResult::success())
            }
            CacheSubcommand::Unset { name } => unset(&self.config, name, out),
        }
    }
}

fn unset(config: &LoaderConfig, name: &str, out: &mut dyn Write) -> Result<CommandResult> {
    let loader = TemplateLoader::from_config(config);

    let Some(cache) = loader.cache() else {
        writeln!(out, "Caching is disabled")?;
        return Ok(CommandResult::failure(1));
    };

    let located = loader.locate(name, &LoadOptions::default())?;
    if cache.unset(&located.cache_key)? {
        writeln!(out, "Removed cached entry {}", located.cache_key)?;
    } else {
        writeln!(out, "No cached entry for {}", located.cache_key)?;
    }

    Ok(CommandResult::success())
}
