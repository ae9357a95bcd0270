//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that assemble an
//! environment take a [`CommandContext`] carrying the workspace root and
//! the `--config` override.

pub mod completions;
pub mod dispatcher;
pub mod docker_env;
pub mod env;
pub mod exec;
pub mod path;
pub mod platform;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
