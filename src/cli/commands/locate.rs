//! `dataset locate` command.

use std::io::Write;

use crate::cache::TemplateCache;
use crate::cli::args::LocateArgs;
use crate::config::LoaderConfig;
use crate::error::Result;
use crate::loader::{LoadOptions, TemplateLoader};

use super::dispatcher::{Command, CommandResult};

/// Prints where a template reference resolves to.
pub struct LocateCommand {
    config: LoaderConfig,
    args: LocateArgs,
}

impl LocateCommand {
    pub fn new(config: LoaderConfig, args: LocateArgs) -> Self {
        Self { config, args }
    }
}

impl Command for LocateCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let loader = TemplateLoader::from_config(&self.config);
        let located = loader.locate(&self.args.name, &LoadOptions::default())?;
        let handle = &located.handle;

        writeln!(out, "Namespace: {}", located.reference.namespace)?;
        writeln!(out, "File: {}", handle.path().display())?;
        writeln!(out, "Local path: {}", handle.local_path())?;
        writeln!(out, "Modified: {}", handle.modified_at().to_rfc3339())?;
        writeln!(out, "Cache key: {}", located.cache_key)?;

        if let Some(cache) = loader.cache() {
            let status = if cache.has(&located.cache_key, handle.modified_at()) {
                "fresh"
            } else {
                "missing or stale"
            };
            writeln!(out, "Cache: {}", status)?;
        }

        Ok(CommandResult::success())
    }
}
