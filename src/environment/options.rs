//! Execution options assembly.
//!
//! Builds the environment a Kubernetes tool command runs with:
//!
//! 1. Start from a base environment (the process environment by default)
//! 2. On Windows, set `HOME` from `USERPROFILE`
//! 3. Prepend the directory of each configured tool to PATH, in the order
//!    kubectl, helm, draft (so the last configured tool ends up first)
//! 4. Right after the first configured tool, run Docker auto-detection
//! 5. Set `KUBECONFIG` if configured

use std::fmt;
use std::path::PathBuf;

use super::context::EnvContext;
use super::docker_env::{auto_configure_docker_env, DockerEnvOutcome, HelperRunner, ProcessHelperRunner};
use crate::config::{Setting, SettingsStore};
use crate::shell::{parent_dir, ExecMode, ExecutionOptions, Platform};

/// Variable pointing tools at a kubeconfig file.
pub const KUBECONFIG_VAR: &str = "KUBECONFIG";

/// External tools whose configured location is put on PATH.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Kubectl,
    Helm,
    Draft,
}

impl Tool {
    /// Tools in PATH assembly order.
    pub const ALL: [Tool; 3] = [Tool::Kubectl, Tool::Helm, Tool::Draft];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Kubectl => "kubectl",
            Tool::Helm => "helm",
            Tool::Draft => "draft",
        }
    }

    /// Setting holding this tool's path.
    pub fn setting(self) -> Setting {
        match self {
            Tool::Kubectl => Setting::KubectlPath,
            Tool::Helm => Setting::HelmPath,
            Tool::Draft => Setting::DraftPath,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builder for [`ExecutionOptions`].
///
/// # Example
///
/// ```
/// use kubeshell::config::{Setting, ShellSettings};
/// use kubeshell::environment::{EnvContext, ExecutionOptionsBuilder};
/// use kubeshell::shell::Platform;
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let settings = ShellSettings::default()
///     .with(Setting::KubectlPath, "/opt/k8s/kubectl")
///     .with(Setting::Kubeconfig, "/home/me/.kube/dev");
///
/// let options = ExecutionOptionsBuilder::new("/work", &settings)
///     .platform(Platform::Linux)
///     .base_env(EnvContext::from_pairs([("PATH", "/usr/bin")]))
///     .without_docker_env()
///     .build()
///     .await;
///
/// assert_eq!(options.env.get("PATH"), Some("/opt/k8s:/usr/bin"));
/// assert_eq!(options.env.get("KUBECONFIG"), Some("/home/me/.kube/dev"));
/// # });
/// ```
pub struct ExecutionOptionsBuilder<'a> {
    workspace_root: PathBuf,
    settings: &'a dyn SettingsStore,
    platform: Platform,
    base_env: Option<EnvContext>,
    runner: Box<dyn HelperRunner + 'a>,
    detect_docker: bool,
    mode: ExecMode,
    silent: bool,
}

impl<'a> ExecutionOptionsBuilder<'a> {
    /// Start building options for commands run from `workspace_root`.
    pub fn new(workspace_root: impl Into<PathBuf>, settings: &'a dyn SettingsStore) -> Self {
        let workspace_root = workspace_root.into();
        Self {
            runner: Box::new(ProcessHelperRunner::in_dir(workspace_root.clone())),
            workspace_root,
            settings,
            platform: Platform::current(),
            base_env: None,
            detect_docker: true,
            mode: ExecMode::Async,
            silent: false,
        }
    }

    /// Assemble for `platform` instead of the host.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Start from `env` instead of the process environment.
    pub fn base_env(mut self, env: EnvContext) -> Self {
        self.base_env = Some(env);
        self
    }

    /// Locate and run Docker helpers with `runner`.
    pub fn docker_env(mut self, runner: impl HelperRunner + 'a) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Skip Docker auto-detection.
    pub fn without_docker_env(mut self) -> Self {
        self.detect_docker = false;
        self
    }

    pub fn mode(mut self, mode: ExecMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Assemble the options.
    pub async fn build(self) -> ExecutionOptions {
        self.build_detailed().await.0
    }

    /// Assemble the options and report what Docker auto-detection did.
    ///
    /// The outcome is `None` when detection was disabled or no tool path is
    /// configured.
    pub async fn build_detailed(self) -> (ExecutionOptions, Option<DockerEnvOutcome>) {
        let platform = self.platform;
        let mut env = self.base_env.unwrap_or_else(EnvContext::from_process);

        if platform.is_windows() {
            if let Some(home) = env.home_dir(platform).map(str::to_string) {
                env.set("HOME", home);
            }
        }

        let mut docker_outcome = None;
        let mut detection_attempted = false;

        for tool in Tool::ALL {
            let Some(tool_path) = self.settings.value(tool.setting()) else {
                continue;
            };

            let dir = parent_dir(platform, &tool_path);
            tracing::debug!("Adding {} directory {} to PATH", tool, dir);
            env.prepend_path(platform, &dir);

            if self.detect_docker && !detection_attempted {
                detection_attempted = true;
                docker_outcome =
                    Some(auto_configure_docker_env(&mut env, platform, self.runner.as_ref()).await);
            }
        }

        if let Some(kubeconfig) = self.settings.value(Setting::Kubeconfig) {
            tracing::debug!("Using kubeconfig {}", kubeconfig);
            env.set(KUBECONFIG_VAR, kubeconfig);
        }

        let options = ExecutionOptions {
            cwd: Some(self.workspace_root),
            env,
            mode: self.mode,
            silent: self.silent,
            platform,
        };
        (options, docker_outcome)
    }
}
