//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for state shared by every command
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::cli::args::{Cli, Commands, PathCommands};
use crate::config::{load_settings, ShellSettings};
use crate::environment::{DockerEnvOutcome, EnvContext};
use crate::error::Result;
use crate::shell::Platform;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
#[async_trait(?Send)]
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Exit status for the kubeshell process itself.
    ///
    /// Codes outside `0..=255`, such as `-1` for a signal-killed child,
    /// become 255 so a failure never wraps around to success.
    pub fn process_exit_code(&self) -> u8 {
        match self.exit_code {
            code @ 0..=255 => code as u8,
            _ => 255,
        }
    }
}

/// Workspace and settings location shared by all commands.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_root: PathBuf,
    pub config_override: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config_override: None,
        }
    }

    pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
        self.config_override = path;
        self
    }

    /// Load settings, reading the home directory and overrides from `env`.
    pub fn load_settings(&self, env: &EnvContext) -> Result<ShellSettings> {
        load_settings(
            &self.project_root,
            self.config_override.as_deref(),
            env,
            Platform::current(),
        )
    }
}

/// Report what Docker auto-detection did while assembling options.
///
/// Failures are warnings: the command still runs without Docker settings.
pub(crate) fn report_docker_outcome(ui: &mut dyn UserInterface, outcome: Option<&DockerEnvOutcome>) {
    match outcome {
        Some(outcome @ DockerEnvOutcome::HelperFailed { .. }) => ui.warning(&outcome.to_string()),
        Some(outcome) => ui.detail(&format!("Docker: {}", outcome)),
        None => {}
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config_override: Option<PathBuf>) -> Self {
        Self {
            context: CommandContext::new(project_root).with_config(config_override),
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Dispatch and execute a command.
    pub async fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.context.clone();
        match &cli.command {
            Commands::Platform(args) => {
                super::platform::PlatformCommand::new(args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Env(args) => super::env::EnvCommand::new(ctx, args.clone()).execute(ui).await,
            Commands::DockerEnv(args) => {
                super::docker_env::DockerEnvCommand::new(ctx, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Exec(args) => super::exec::ExecCommand::new(ctx, args.clone()).execute(ui).await,
            Commands::Path(PathCommands::Join(args)) => {
                super::path::PathJoinCommand::new(args.clone()).execute(ui).await
            }
            Commands::Path(PathCommands::Uri(args)) => {
                super::path::PathUriCommand::new(args.clone()).execute(ui).await
            }
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone())
                    .execute(ui)
                    .await
            }
        }
    }
}
