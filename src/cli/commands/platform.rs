//! Platform command implementation.
//!
//! The `kubeshell platform` command shows the detected platform and the
//! conventions kubeshell applies on it.

use async_trait::async_trait;
use serde::Serialize;

use crate::cli::args::PlatformArgs;
use crate::environment::EnvContext;
use crate::error::Result;
use crate::shell::Platform;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Facts about a platform as seen from an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformReport {
    pub platform: String,
    pub is_windows: bool,
    pub is_unix: bool,
    pub home_variable: String,
    pub home: Option<String>,
    pub path_variable: String,
    pub path_separator: String,
    pub dir_separator: String,
}

impl PlatformReport {
    pub fn collect(platform: Platform, env: &EnvContext) -> Self {
        Self {
            platform: platform.to_string(),
            is_windows: platform.is_windows(),
            is_unix: platform.is_unix(),
            home_variable: platform.home_variable().to_string(),
            home: env.home_dir(platform).map(str::to_string),
            path_variable: env.path_variable_name(platform),
            path_separator: platform.path_entry_separator().to_string(),
            dir_separator: platform.dir_separator().to_string(),
        }
    }
}

/// The platform command implementation.
pub struct PlatformCommand {
    args: PlatformArgs,
    platform: Platform,
    env: Option<EnvContext>,
}

impl PlatformCommand {
    /// Create a new platform command for the host.
    pub fn new(args: PlatformArgs) -> Self {
        Self {
            args,
            platform: Platform::current(),
            env: None,
        }
    }

    /// Report on `platform` as seen from `env` instead of the host.
    pub fn for_env(mut self, platform: Platform, env: EnvContext) -> Self {
        self.platform = platform;
        self.env = Some(env);
        self
    }
}

#[async_trait(?Send)]
impl Command for PlatformCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let env = self.env.clone().unwrap_or_else(EnvContext::from_process);
        let report = PlatformReport::collect(self.platform, &env);

        if self.args.json {
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            ui.data(&format!("{}\n", json));
            return Ok(CommandResult::success());
        }

        let unix = if report.is_unix { "yes" } else { "no" };
        let home = report.home.as_deref().unwrap_or("(unset)");
        let rows = [
            ("Platform", report.platform.as_str()),
            ("Unix-like", unix),
            ("Home variable", report.home_variable.as_str()),
            ("Home", home),
            ("PATH variable", report.path_variable.as_str()),
            ("PATH separator", report.path_separator.as_str()),
            ("Dir separator", report.dir_separator.as_str()),
        ];
        let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in rows {
            ui.key_value(key, value, width);
        }

        Ok(CommandResult::success())
    }
}
