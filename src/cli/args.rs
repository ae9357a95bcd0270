//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::shell::Platform;

/// Kubeshell - run Kubernetes tooling with a prepared environment.
#[derive(Debug, Parser)]
#[command(name = "kubeshell")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (replaces the .kubeshell/config.yml layers)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to workspace root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the detected platform and its conventions
    Platform(PlatformArgs),

    /// Show the environment commands would run with
    Env(EnvArgs),

    /// Detect minikube/minishift Docker settings and print them as exports
    DockerEnv(DockerEnvArgs),

    /// Run a command with the assembled environment
    Exec(ExecArgs),

    /// Platform-aware path helpers
    #[command(subcommand)]
    Path(PathCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `platform` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PlatformArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `env` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip minikube/minishift detection
    #[arg(long)]
    pub no_docker_env: bool,
}

/// Arguments for the `docker-env` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DockerEnvArgs {}

/// Arguments for the `exec` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExecArgs {
    /// Text written to the command's stdin
    #[arg(long)]
    pub stdin: Option<String>,

    /// Skip minikube/minishift detection
    #[arg(long)]
    pub no_docker_env: bool,

    /// Run with blocking process I/O instead of the async runtime
    #[arg(long)]
    pub blocking: bool,

    /// Stream output line by line as it is produced
    #[arg(long, conflicts_with = "stdin")]
    pub follow: bool,

    /// Command line, run through the platform shell
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// `path` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum PathCommands {
    /// Join a relative path onto a base path
    Join(PathJoinArgs),

    /// Convert a filesystem path to a file:// URI
    Uri(PathUriArgs),
}

/// Arguments for `path join`.
#[derive(Debug, Clone, clap::Args)]
pub struct PathJoinArgs {
    pub base: String,

    pub relative: String,

    /// Target platform (windows, macos, linux); defaults to the host
    #[arg(long)]
    pub platform: Option<Platform>,
}

/// Arguments for `path uri`.
#[derive(Debug, Clone, clap::Args)]
pub struct PathUriArgs {
    pub path: String,

    /// Target platform (windows, macos, linux); defaults to the host
    #[arg(long)]
    pub platform: Option<Platform>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags() {
        let cli = Cli::parse_from(["kubeshell", "--debug", "-p", "/work", "platform"]);
        assert!(cli.debug);
        assert_eq!(cli.project, Some(PathBuf::from("/work")));
        assert!(matches!(cli.command, Commands::Platform(_)));
    }

    #[test]
    fn exec_keeps_trailing_arguments() {
        let cli = Cli::parse_from(["kubeshell", "exec", "--blocking", "kubectl", "get", "-o", "yaml"]);
        match cli.command {
            Commands::Exec(args) => {
                assert!(args.blocking);
                assert_eq!(args.command, vec!["kubectl", "get", "-o", "yaml"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn exec_requires_a_command() {
        assert!(Cli::try_parse_from(["kubeshell", "exec"]).is_err());
    }

    #[test]
    fn path_join_parses_platform() {
        let cli = Cli::parse_from(["kubeshell", "path", "join", "C:\\a", "b/c", "--platform", "win32"]);
        match cli.command {
            Commands::Path(PathCommands::Join(args)) => {
                assert_eq!(args.platform, Some(Platform::Windows));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn path_rejects_unknown_platform() {
        assert!(Cli::try_parse_from(["kubeshell", "path", "uri", "/a", "--platform", "beos"]).is_err());
    }
}
