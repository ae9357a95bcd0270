//! Command-line interface for kubeshell.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompletionsArgs, DockerEnvArgs, EnvArgs, ExecArgs, PathCommands, PathJoinArgs,
    PathUriArgs, PlatformArgs,
};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
