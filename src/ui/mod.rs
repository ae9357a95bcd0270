//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal usage
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use kubeshell::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.data("export DOCKER_HOST=tcp://1.2.3.4:2376\n");
//! assert!(ui.stdout().contains("DOCKER_HOST"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, ShellTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a line only shown in verbose mode.
    fn detail(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Always shown.
    fn error(&mut self, msg: &str);

    /// Show a header line.
    fn show_header(&mut self, title: &str);

    /// Show a `key: value` result line. Always shown.
    fn key_value(&mut self, key: &str, value: &str, width: usize);

    /// Write raw text to stdout. Always shown, no newline added.
    fn data(&mut self, text: &str);

    /// Write raw text to stderr. Always shown, no newline added.
    fn data_err(&mut self, text: &str);
}
