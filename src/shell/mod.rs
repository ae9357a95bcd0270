//! Platform detection, path helpers and subprocess execution.

pub mod command;
pub mod paths;
pub mod platform;

pub use command::{
    exec, exec_check, exec_streaming, exec_with_stdin, run_program, ExecMode, ExecutionOptions,
    OutputLine, ShellResult,
};
pub use paths::{combine_path, file_uri, parent_dir};
pub use platform::{is_unix, is_windows, Platform};
