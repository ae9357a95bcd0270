//! Env command implementation.
//!
//! The `kubeshell env` command shows the variables a command run through
//! kubeshell would get on top of the current environment.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::cli::args::EnvArgs;
use crate::environment::{EnvContext, ExecutionOptionsBuilder};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{report_docker_outcome, Command, CommandContext, CommandResult};

#[derive(Debug, Serialize)]
struct EnvReport<'a> {
    cwd: Option<String>,
    changed: BTreeMap<&'a str, &'a str>,
    docker: Option<String>,
}

/// The env command implementation.
pub struct EnvCommand {
    ctx: CommandContext,
    args: EnvArgs,
    base_env: Option<EnvContext>,
}

impl EnvCommand {
    /// Create a new env command.
    pub fn new(ctx: CommandContext, args: EnvArgs) -> Self {
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
}

#[async_trait(?Send)]
impl Command for EnvCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let base = self.base_env.clone().unwrap_or_else(EnvContext::from_process);
        let settings = self.ctx.load_settings(&base)?;

        let mut builder = ExecutionOptionsBuilder::new(&self.ctx.project_root, &settings)
            .base_env(base.clone())
            .silent(true);
        if self.args.no_docker_env {
            builder = builder.without_docker_env();
        }
        let (options, outcome) = builder.build_detailed().await;

        let changed: BTreeMap<&str, &str> = options
            .env
            .changed_from(&base)
            .into_iter()
            .filter_map(|name| options.env.get(name).map(|value| (name, value)))
            .collect();

        if self.args.json {
            let report = EnvReport {
                cwd: options.cwd.as_ref().map(|p| p.display().to_string()),
                changed,
                docker: outcome.as_ref().map(|o| o.to_string()),
            };
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            ui.data(&format!("{}\n", json));
            return Ok(CommandResult::success());
        }

        report_docker_outcome(ui, outcome.as_ref());

        if changed.is_empty() {
            ui.message("No settings configured; commands run with the current environment.");
            return Ok(CommandResult::success());
        }

        for (name, value) in changed {
            ui.data(&format!("{}={}\n", name, value));
        }
        Ok(CommandResult::success())
    }
}
