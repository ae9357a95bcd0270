//! Docker-env command implementation.
//!
//! The `kubeshell docker-env` command runs minikube/minishift detection
//! against the current environment and prints the result as shell exports:
//!
//! ```sh
//! eval "$(kubeshell docker-env)"
//! ```

use async_trait::async_trait;

use crate::cli::args::DockerEnvArgs;
use crate::environment::{auto_configure_docker_env, DockerEnvOutcome, EnvContext, HelperRunner, ProcessHelperRunner};
use crate::error::Result;
use crate::shell::Platform;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The docker-env command implementation.
pub struct DockerEnvCommand {
    ctx: CommandContext,
    base_env: Option<EnvContext>,
    runner: Option<Box<dyn HelperRunner>>,
}

impl DockerEnvCommand {
    /// Create a new docker-env command.
    pub fn new(ctx: CommandContext, _args: DockerEnvArgs) -> Self {
        Self {
            ctx,
            base_env: None,
            runner: None,
        }
    }

    /// Detect against `env` instead of the process environment.
    ///
    /// The process environment is then left untouched.
    pub fn with_base_env(mut self, env: EnvContext) -> Self {
        self.base_env = Some(env);
        self
    }

    /// Locate and run helpers with `runner`.
    pub fn with_runner(mut self, runner: impl HelperRunner + 'static) -> Self {
        self.runner = Some(Box::new(runner));
        self
    }
}

/// Format a variable as a POSIX `export` line.
pub fn export_line(name: &str, value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("export {}=\"{}\"\n", name, escaped)
}

#[async_trait(?Send)]
impl Command for DockerEnvCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut env = self.base_env.clone().unwrap_or_else(EnvContext::from_process);
        let default_runner = ProcessHelperRunner::in_dir(&self.ctx.project_root);
        let runner: &dyn HelperRunner = match &self.runner {
            Some(runner) => runner.as_ref(),
            None => &default_runner,
        };

        let outcome = auto_configure_docker_env(&mut env, Platform::current(), runner).await;

        match &outcome {
            DockerEnvOutcome::Configured {
                applied,
                skipped_lines,
                ..
            } => {
                for (name, value) in applied {
                    ui.data(&export_line(name, value));
                }
                for line in skipped_lines {
                    ui.detail(&format!("ignored: {}", line));
                }
                if self.base_env.is_none() {
                    env.apply_to_process();
                }
                ui.success(&outcome.to_string());
                Ok(CommandResult::success())
            }
            DockerEnvOutcome::AlreadyConfigured { .. } => {
                ui.warning(&outcome.to_string());
                Ok(CommandResult::success())
            }
            DockerEnvOutcome::NoHelper | DockerEnvOutcome::HelperFailed { .. } => {
                ui.error(&outcome.to_string());
                Ok(CommandResult::failure(1))
            }
        }
    }
}
