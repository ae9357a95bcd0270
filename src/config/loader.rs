//! Settings file discovery and loading.
//!
//! This module handles finding and loading settings files from
//! various locations in the correct priority order.

use crate::config::merger::merge_configs;
use crate::config::settings::ShellSettings;
use crate::environment::EnvContext;
use crate::error::{KubeshellError, Result};
use crate::shell::Platform;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding kubeshell settings, in the home and project directories.
pub const CONFIG_DIR: &str = ".kubeshell";

/// Paths to settings files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.kubeshell/config.yml`)
/// 2. Project config (`.kubeshell/config.yml`)
/// 3. Local overrides (`.kubeshell/config.local.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.kubeshell/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .kubeshell/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .kubeshell/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover settings files for the given project root.
    ///
    /// `home` is the user's home directory, if known.
    pub fn discover(project_root: &Path, home: Option<&Path>) -> Self {
        Self {
            user_global: home.and_then(|h| existing(h.join(CONFIG_DIR).join("config.yml"))),
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a settings file as a raw YAML value (for merging).
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            KubeshellError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            KubeshellError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| KubeshellError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse YAML content into settings.
pub fn parse_settings(content: &str, source_path: &Path) -> Result<ShellSettings> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| KubeshellError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    settings_from_value(value, source_path)
}

fn settings_from_value(value: serde_yaml::Value, source_path: &Path) -> Result<ShellSettings> {
    if value.is_null() {
        return Ok(ShellSettings::default());
    }
    serde_yaml::from_value(value).map_err(|e| KubeshellError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every settings file that exists for a project.
///
/// Missing files are skipped; with no files at all the result is empty
/// settings.
pub fn load_merged_settings(project_root: &Path, home: Option<&Path>) -> Result<ShellSettings> {
    let paths = ConfigPaths::discover(project_root, home);

    let mut layers = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading settings from {}", path.display());
        layers.push(load_config_value(path)?);
    }

    settings_from_value(
        merge_configs(&layers),
        &project_root.join(CONFIG_DIR).join("config.yml"),
    )
}

/// Load settings the way the CLI does.
///
/// If `config_override` is given, only that file is read and it must exist.
/// Otherwise the layered files are merged. `KUBESHELL_*` variables from
/// `env` are applied last.
pub fn load_settings(
    project_root: &Path,
    config_override: Option<&Path>,
    env: &EnvContext,
    platform: Platform,
) -> Result<ShellSettings> {
    let settings = match config_override {
        Some(path) => settings_from_value(load_config_value(path)?, path)?,
        None => {
            let home = env.home_dir(platform).map(PathBuf::from);
            load_merged_settings(project_root, home.as_deref())?
        }
    };

    Ok(settings.with_env_overrides(|key| env.get(key).map(str::to_string)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{Setting, SettingsStore};
    use tempfile::TempDir;

    fn write_config(root: &Path, name: &str, content: &str) -> PathBuf {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn discover_finds_project_config() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "helm-path: /h");

        let paths = ConfigPaths::discover(temp.path(), None);
        assert!(paths.project.is_some());
        assert!(paths.user_global.is_none());
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path(), Some(temp.path()));
        assert!(paths.project.is_none());
        assert!(paths.project_local.is_none());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn all_existing_returns_in_merge_order() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let global = write_config(home.path(), "config.yml", "");
        let main = write_config(project.path(), "config.yml", "");
        let local = write_config(project.path(), "config.local.yml", "");

        let paths = ConfigPaths::discover(project.path(), Some(home.path()));
        assert_eq!(paths.all_existing(), vec![&global, &main, &local]);
    }

    #[test]
    fn merged_settings_respect_layer_order() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_config(
            home.path(),
            "config.yml",
            "kubectl-path: /global/kubectl\nkubeconfig: /global/config",
        );
        write_config(project.path(), "config.yml", "kubectl-path: /project/kubectl");
        write_config(project.path(), "config.local.yml", "kubeconfig: null\nhelm-path: /local/helm");

        let settings = load_merged_settings(project.path(), Some(home.path())).unwrap();

        assert_eq!(settings.kubectl_path.as_deref(), Some("/project/kubectl"));
        assert_eq!(settings.helm_path.as_deref(), Some("/local/helm"));
        assert!(settings.kubeconfig.is_none());
    }

    #[test]
    fn no_files_means_empty_settings() {
        let project = TempDir::new().unwrap();
        let settings = load_merged_settings(project.path(), None).unwrap();
        assert_eq!(settings, ShellSettings::default());
    }

    #[test]
    fn empty_file_means_empty_settings() {
        let project = TempDir::new().unwrap();
        write_config(project.path(), "config.yml", "");
        let settings = load_merged_settings(project.path(), None).unwrap();
        assert_eq!(settings, ShellSettings::default());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let project = TempDir::new().unwrap();
        write_config(project.path(), "config.yml", "kubectl-path: [unclosed");

        let err = load_merged_settings(project.path(), None).unwrap_err();
        assert!(matches!(err, KubeshellError::ConfigParseError { .. }));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err = parse_settings("helm-path:\n  nested: true", Path::new("x.yml")).unwrap_err();
        assert!(err.to_string().contains("x.yml"));
    }

    #[test]
    fn explicit_override_must_exist() {
        let project = TempDir::new().unwrap();
        let missing = project.path().join("missing.yml");

        let err = load_settings(project.path(), Some(&missing), &EnvContext::new(), Platform::Linux)
            .unwrap_err();
        assert!(matches!(err, KubeshellError::ConfigNotFound { .. }));
    }

    #[test]
    fn explicit_override_skips_layers() {
        let project = TempDir::new().unwrap();
        write_config(project.path(), "config.yml", "helm-path: /project/helm");
        let custom = project.path().join("custom.yml");
        fs::write(&custom, "draft-path: /custom/draft").unwrap();

        let settings =
            load_settings(project.path(), Some(&custom), &EnvContext::new(), Platform::Linux)
                .unwrap();
        assert!(settings.helm_path.is_none());
        assert_eq!(settings.draft_path.as_deref(), Some("/custom/draft"));
    }

    #[test]
    fn load_settings_reads_home_from_env_and_applies_overrides() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        write_config(home.path(), "config.yml", "helm-path: /global/helm");

        let env = EnvContext::from_pairs([
            ("HOME", home.path().to_string_lossy().to_string()),
            ("KUBESHELL_DRAFT_PATH", "/env/draft".to_string()),
        ]);
        let settings = load_settings(project.path(), None, &env, Platform::Linux).unwrap();

        assert_eq!(settings.value(Setting::HelmPath).as_deref(), Some("/global/helm"));
        assert_eq!(settings.value(Setting::DraftPath).as_deref(), Some("/env/draft"));
    }
}
