//! Settings for execution option assembly.
//!
//! - The [`SettingsStore`] trait and the four fixed settings in [`settings`]
//! - File discovery and loading in [`loader`]
//! - Layered merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use kubeshell::config::{load_merged_settings, Setting, SettingsStore};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".kubeshell");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "kubectl-path: /opt/k8s/kubectl").unwrap();
//!
//! let settings = load_merged_settings(temp.path(), None).unwrap();
//! assert_eq!(settings.value(Setting::KubectlPath).as_deref(), Some("/opt/k8s/kubectl"));
//! ```
//!
//! # Configuration File Locations
//!
//! Settings are discovered and merged in this order:
//! 1. User global config (`~/.kubeshell/config.yml`)
//! 2. Project config (`.kubeshell/config.yml`)
//! 3. Local overrides (`.kubeshell/config.local.yml`)
//! 4. `KUBESHELL_*` environment variables

pub mod loader;
pub mod merger;
pub mod settings;

pub use loader::{
    load_config_value, load_merged_settings, load_settings, parse_settings, ConfigPaths,
    CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use settings::{Setting, SettingsStore, ShellSettings};
