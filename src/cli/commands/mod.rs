//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`], which also loads the configuration
//! shared by all of them.

pub mod cache;
pub mod dispatcher;
pub mod locate;
pub mod show;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
