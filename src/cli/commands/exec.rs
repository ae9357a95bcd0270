//! Exec command implementation.
//!
//! The `kubeshell exec` command runs a command line through the platform
//! shell with the assembled environment, relays its output and exits with
//! its exit code.

use async_trait::async_trait;

use crate::cli::args::ExecArgs;
use crate::environment::{EnvContext, ExecutionOptionsBuilder};
use crate::error::Result;
use crate::shell::{exec_streaming, exec_with_stdin, ExecMode, OutputLine};
use crate::ui::UserInterface;

use super::dispatcher::{report_docker_outcome, Command, CommandContext, CommandResult};

/// The exec command implementation.
pub struct ExecCommand {
    ctx: CommandContext,
    args: ExecArgs,
    base_env: Option<EnvContext>,
}

impl ExecCommand {
    /// Create a new exec command.
    pub fn new(ctx: CommandContext, args: ExecArgs) -> Self {
        Self {
            ctx,
            args,
            base_env: None,
        }
    }

    /// Assemble from `env` instead of the process environment.
    pub fn with_base_env(mut self, env: EnvContext) -> Self {
        self.base_env = Some(env);
        self
    }

    /// The command line handed to the shell.
    pub fn command_line(&self) -> String {
        self.args.command.join(" ")
    }
}

#[async_trait(?Send)]
impl Command for ExecCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let base = self.base_env.clone().unwrap_or_else(EnvContext::from_process);
        let settings = self.ctx.load_settings(&base)?;

        let mode = if self.args.blocking {
            ExecMode::Blocking
        } else {
            ExecMode::Async
        };
        let mut builder = ExecutionOptionsBuilder::new(&self.ctx.project_root, &settings)
            .base_env(base)
            .mode(mode)
            .silent(!ui.output_mode().shows_details());
        if self.args.no_docker_env {
            builder = builder.without_docker_env();
        }
        let (options, outcome) = builder.build_detailed().await;
        report_docker_outcome(ui, outcome.as_ref());

        let command = self.command_line();
        let result = if self.args.follow {
            exec_streaming(&command, &options, |line| match line {
                OutputLine::Stdout(line) => println!("{}", line),
                OutputLine::Stderr(line) => eprintln!("{}", line),
            })
            .await?
        } else {
            let result = exec_with_stdin(&command, self.args.stdin.as_deref(), &options).await?;
            ui.data(&result.stdout);
            ui.data_err(&result.stderr);
            result
        };

        if result.success() {
            Ok(CommandResult::success())
        } else {
            tracing::debug!("'{}' exited with {}", command, result.exit_code);
            Ok(CommandResult::failure(result.exit_code))
        }
    }
}
