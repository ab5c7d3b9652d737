//! `dataset show` command.

use std::io::Write;

use crate::cli::args::ShowArgs;
use crate::config::LoaderConfig;
use crate::error::Result;
use crate::loader::{LoadOptions, TemplateLoader};

use super::dispatcher::{Command, CommandResult};

/// Loads a template and prints it.
pub struct ShowCommand {
    config: LoaderConfig,
    args: ShowArgs,
}

impl ShowCommand {
    pub fn new(config: LoaderConfig, args: ShowArgs) -> Self {
        Self { config, args }
    }
}

impl Command for ShowCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let loader = TemplateLoader::from_config(&self.config);
        let options = LoadOptions {
            not_extend: self.args.not_extend,
        };

        let template = loader.load(&self.args.name, &options)?;

        let rendered = if self.args.json {
            serde_json::to_string_pretty(&template).map_err(anyhow::Error::from)?
        } else {
            serde_yaml::to_string(&template).map_err(anyhow::Error::from)?
        };

        writeln!(out, "{}", rendered.trim_end())?;
        Ok(CommandResult::success())
    }
}
