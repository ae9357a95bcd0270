//! Kubeshell - run Kubernetes tooling with a prepared environment.
//!
//! Kubeshell puts the configured `kubectl`, `helm` and `draft` on PATH,
//! points them at a kubeconfig, picks up Docker settings from a local
//! minikube or minishift, and runs commands through the platform shell.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings store, YAML settings files and layering
//! - [`environment`] - Environment context, Docker detection, option assembly
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Platform detection, path helpers, command execution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use kubeshell::shell::{combine_path, file_uri, Platform};
//!
//! assert_eq!(combine_path(Platform::Windows, "C:\\work", "charts/app"), "C:\\work\\charts\\app");
//! assert_eq!(file_uri(Platform::Linux, "/work/app.yaml"), "file:///work/app.yaml");
//! ```
//!
//! For end-to-end command execution, see the integration tests.

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod shell;
pub mod ui;

pub use error::{KubeshellError, Result};
