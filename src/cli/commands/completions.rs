//! Shell completions generation.
//!
//! The `kubeshell completions` command generates shell completion scripts.

use async_trait::async_trait;
use clap::CommandFactory;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Render the completion script.
    pub fn render(&self) -> crate::error::Result<String> {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(self.args.shell, &mut cmd, "kubeshell", &mut buf);
        String::from_utf8(buf).map_err(|e| anyhow::Error::from(e).into())
    }
}

#[async_trait(?Send)]
impl Command for CompletionsCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        ui.data(&self.render()?);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    #[test]
    fn generates_bash_completions() {
        let output = CompletionsCommand::new(CompletionsArgs { shell: Shell::Bash })
            .render()
            .unwrap();
        assert!(output.contains("kubeshell"));
        assert!(output.contains("complete"));
    }

    #[test]
    fn generates_zsh_completions() {
        let output = CompletionsCommand::new(CompletionsArgs { shell: Shell::Zsh })
            .render()
            .unwrap();
        assert!(output.contains("docker-env"));
    }

    #[test]
    fn generates_fish_completions() {
        let output = CompletionsCommand::new(CompletionsArgs { shell: Shell::Fish })
            .render()
            .unwrap();
        assert!(output.contains("kubeshell"));
    }
}
