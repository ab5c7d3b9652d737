//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::cache::CacheArgs;

/// Dataset - Load namespaced templates with caching and inheritance.
#[derive(Debug, Parser)]
#[command(name = "dataset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .dataset/config.yml)
    #[arg(short, long, global = true, env = "DATASET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a template and print it
    Show(ShowArgs),

    /// Show where a template reference resolves to
    Locate(LocateArgs),

    /// Manage the template cache
    Cache(CacheArgs),
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Template reference (`name` or `namespace::name`)
    pub name: String,

    /// Do not resolve `extends`
    #[arg(long)]
    pub not_extend: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `locate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LocateArgs {
    /// Template reference (`name` or `namespace::name`)
    pub name: String,
}
