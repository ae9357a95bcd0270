//! Tool-path settings.
//!
//! Four string settings drive execution option assembly. They are read
//! through [`SettingsStore`] so callers can back them with a YAML file
//! ([`ShellSettings`]), a plain map, or their own host configuration.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A setting the shim reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    KubectlPath,
    HelmPath,
    DraftPath,
    Kubeconfig,
}

impl Setting {
    pub const ALL: [Setting; 4] = [
        Setting::KubectlPath,
        Setting::HelmPath,
        Setting::DraftPath,
        Setting::Kubeconfig,
    ];

    /// Fixed key used in settings files and maps.
    pub fn key(self) -> &'static str {
        match self {
            Setting::KubectlPath => "kubectl-path",
            Setting::HelmPath => "helm-path",
            Setting::DraftPath => "draft-path",
            Setting::Kubeconfig => "kubeconfig",
        }
    }

    /// Environment variable that overrides the file value.
    pub fn env_override(self) -> &'static str {
        match self {
            Setting::KubectlPath => "KUBESHELL_KUBECTL_PATH",
            Setting::HelmPath => "KUBESHELL_HELM_PATH",
            Setting::DraftPath => "KUBESHELL_DRAFT_PATH",
            Setting::Kubeconfig => "KUBESHELL_KUBECONFIG",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Read access to string settings.
///
/// Implementations return `None` for absent settings. Empty strings are
/// treated as absent by [`SettingsStore::value`].
pub trait SettingsStore {
    /// Raw lookup.
    fn get(&self, setting: Setting) -> Option<String>;

    /// Lookup that treats an empty value as unset.
    fn value(&self, setting: Setting) -> Option<String> {
        self.get(setting).filter(|v| !v.trim().is_empty())
    }
}

impl<T: SettingsStore + ?Sized> SettingsStore for &T {
    fn get(&self, setting: Setting) -> Option<String> {
        (**self).get(setting)
    }
}

impl SettingsStore for HashMap<String, String> {
    fn get(&self, setting: Setting) -> Option<String> {
        HashMap::get(self, setting.key()).cloned()
    }
}

/// Settings file contents.
///
/// ```yaml
/// kubectl-path: /opt/k8s/bin/kubectl
/// helm-path: /opt/helm/helm
/// kubeconfig: /home/me/.kube/dev-config
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShellSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubectl_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helm_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,
}

impl ShellSettings {
    fn slot(&mut self, setting: Setting) -> &mut Option<String> {
        match setting {
            Setting::KubectlPath => &mut self.kubectl_path,
            Setting::HelmPath => &mut self.helm_path,
            Setting::DraftPath => &mut self.draft_path,
            Setting::Kubeconfig => &mut self.kubeconfig,
        }
    }

    /// Set a value, returning `self` for chaining.
    ///
    /// # Example
    ///
    /// ```
    /// use kubeshell::config::{Setting, SettingsStore, ShellSettings};
    ///
    /// let settings = ShellSettings::default().with(Setting::HelmPath, "/opt/helm/helm");
    /// assert_eq!(settings.value(Setting::HelmPath).as_deref(), Some("/opt/helm/helm"));
    /// ```
    pub fn with(mut self, setting: Setting, value: impl Into<String>) -> Self {
        *self.slot(setting) = Some(value.into());
        self
    }

    /// Apply `KUBESHELL_*` overrides using a custom env lookup.
    ///
    /// An override that is set but empty clears the setting.
    pub fn with_env_overrides<F>(mut self, env_fn: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for setting in Setting::ALL {
            if let Some(value) = env_fn(setting.env_override()) {
                tracing::debug!("{} overridden by {}", setting, setting.env_override());
                *self.slot(setting) = if value.is_empty() { None } else { Some(value) };
            }
        }
        self
    }
}

impl SettingsStore for ShellSettings {
    fn get(&self, setting: Setting) -> Option<String> {
        match setting {
            Setting::KubectlPath => self.kubectl_path.clone(),
            Setting::HelmPath => self.helm_path.clone(),
            Setting::DraftPath => self.draft_path.clone(),
            Setting::Kubeconfig => self.kubeconfig.clone(),
        }
    }
}
