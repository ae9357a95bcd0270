//! Path command implementations.
//!
//! `kubeshell path join` and `kubeshell path uri` expose the platform-aware
//! path helpers, optionally for a platform other than the host.

use async_trait::async_trait;

use crate::cli::args::{PathJoinArgs, PathUriArgs};
use crate::error::Result;
use crate::shell::{combine_path, file_uri};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The `path join` command implementation.
pub struct PathJoinCommand {
    args: PathJoinArgs,
}

impl PathJoinCommand {
    pub fn new(args: PathJoinArgs) -> Self {
        Self { args }
    }
}

#[async_trait(?Send)]
impl Command for PathJoinCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let platform = self.args.platform.unwrap_or_default();
        let joined = combine_path(platform, &self.args.base, &self.args.relative);
        ui.data(&format!("{}\n", joined));
        Ok(CommandResult::success())
    }
}

/// The `path uri` command implementation.
pub struct PathUriCommand {
    args: PathUriArgs,
}

impl PathUriCommand {
    pub fn new(args: PathUriArgs) -> Self {
        Self { args }
    }
}

#[async_trait(?Send)]
impl Command for PathUriCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let platform = self.args.platform.unwrap_or_default();
        ui.data(&format!("{}\n", file_uri(platform, &self.args.path)));
        Ok(CommandResult::success())
    }
}
