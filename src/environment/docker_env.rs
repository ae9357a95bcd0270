//! Local container-engine auto-detection.
//!
//! When neither `DOCKER_HOST` nor `DOCKER_CERT_PATH` is set, ask a local
//! cluster manager (`minikube`, then `minishift`) for its `docker-env` and
//! copy the exported variables into an [`EnvContext`].
//!
//! # Example
//!
//! ```
//! use kubeshell::environment::parse_docker_env;
//!
//! let output = "export DOCKER_TLS_VERIFY=\"1\"\n\
//!               export DOCKER_HOST=\"tcp://192.168.99.100:2376\"\n\
//!               # Run this command to configure your shell:\n";
//! let exports = parse_docker_env(output);
//! assert_eq!(exports.vars[1], ("DOCKER_HOST".to_string(), "tcp://192.168.99.100:2376".to_string()));
//! assert_eq!(exports.skipped.len(), 1);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use super::context::EnvContext;
use super::probe::find_executable;
use crate::error::Result;
use crate::shell::{run_program, ExecutionOptions, Platform, ShellResult};

/// Variables whose presence means the user already configured Docker.
pub const EXPLICIT_DOCKER_VARS: [&str; 2] = ["DOCKER_HOST", "DOCKER_CERT_PATH"];

/// Regex for `export NAME=VALUE` lines.
static EXPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^export ([A-Za-z0-9_]+)=(.*)$").expect("EXPORT_REGEX must compile")
});

/// A local cluster manager that can print Docker environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    Minikube,
    Minishift,
}

impl Helper {
    /// Helpers in the order they are tried.
    pub const ALL: [Helper; 2] = [Helper::Minikube, Helper::Minishift];

    pub fn binary_name(self) -> &'static str {
        match self {
            Helper::Minikube => "minikube",
            Helper::Minishift => "minishift",
        }
    }
}

impl fmt::Display for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary_name())
    }
}

/// What auto-detection did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockerEnvOutcome {
    /// An explicit Docker variable was already set; nothing was touched.
    AlreadyConfigured { variable: String },

    /// Neither helper is on PATH.
    NoHelper,

    /// A helper was found but every attempt failed. Carries the last failure.
    HelperFailed {
        helper: Helper,
        exit_code: i32,
        stderr: String,
    },

    /// Variables from `helper` were written into the environment.
    Configured {
        helper: Helper,
        applied: Vec<(String, String)>,
        skipped_lines: Vec<String>,
    },
}

impl DockerEnvOutcome {
    /// True only when variables were applied.
    pub fn configured(&self) -> bool {
        matches!(self, Self::Configured { .. })
    }
}

impl fmt::Display for DockerEnvOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyConfigured { variable } => {
                write!(f, "{} is already set; leaving Docker environment alone", variable)
            }
            Self::NoHelper => write!(f, "neither minikube nor minishift found on PATH"),
            Self::HelperFailed {
                helper,
                exit_code,
                stderr,
            } => {
                write!(f, "{} docker-env failed (exit {})", helper, exit_code)?;
                if !stderr.trim().is_empty() {
                    write!(f, ": {}", stderr.trim())?;
                }
                Ok(())
            }
            Self::Configured {
                helper, applied, ..
            } => write!(f, "applied {} variable(s) from {}", applied.len(), helper),
        }
    }
}

/// Parsed `docker-env` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DockerEnvExports {
    /// Variables in output order, quotes removed.
    pub vars: Vec<(String, String)>,
    /// Non-empty lines that were not `export` statements.
    pub skipped: Vec<String>,
}

/// Parse `export NAME=VALUE` lines.
///
/// Empty lines are dropped. Every `"` in a value is removed, wherever it
/// appears. Other lines are collected in `skipped`.
pub fn parse_docker_env(output: &str) -> DockerEnvExports {
    let mut exports = DockerEnvExports::default();

    for line in output.lines().filter(|l| !l.is_empty()) {
        match EXPORT_REGEX.captures(line) {
            Some(caps) => {
                let name = caps[1].to_string();
                let value = caps[2].replace('"', "");
                exports.vars.push((name, value));
            }
            None => exports.skipped.push(line.to_string()),
        }
    }

    exports
}

/// Locates and runs helpers.
///
/// [`ProcessHelperRunner`] is the real implementation; tests substitute
/// canned results.
#[async_trait]
pub trait HelperRunner: Send + Sync {
    /// Find the helper's executable.
    fn locate(&self, helper: Helper, env: &EnvContext, platform: Platform) -> Option<PathBuf> {
        find_executable(helper.binary_name(), env, platform)
    }

    /// Run `<program> docker-env` with `env` as the child environment.
    async fn docker_env(&self, helper: Helper, program: &Path, env: &EnvContext) -> Result<ShellResult>;
}

#[async_trait]
impl<T: HelperRunner + ?Sized> HelperRunner for &T {
    fn locate(&self, helper: Helper, env: &EnvContext, platform: Platform) -> Option<PathBuf> {
        (**self).locate(helper, env, platform)
    }

    async fn docker_env(&self, helper: Helper, program: &Path, env: &EnvContext) -> Result<ShellResult> {
        (**self).docker_env(helper, program, env).await
    }
}

/// Runs helpers as real subprocesses.
#[derive(Debug, Clone, Default)]
pub struct ProcessHelperRunner {
    cwd: Option<PathBuf>,
}

impl ProcessHelperRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run helpers from `cwd`.
    pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }
}

#[async_trait]
impl HelperRunner for ProcessHelperRunner {
    async fn docker_env(&self, helper: Helper, program: &Path, env: &EnvContext) -> Result<ShellResult> {
        tracing::debug!("Running {} docker-env", helper);
        let options = ExecutionOptions {
            cwd: self.cwd.clone(),
            env: env.clone(),
            silent: true,
            ..Default::default()
        };
        run_program(program, &["docker-env"], &options).await
    }
}

/// Configure Docker variables in `env` from a local cluster manager.
///
/// 1. Explicit `DOCKER_HOST` / `DOCKER_CERT_PATH` wins; nothing happens.
/// 2. `minikube docker-env` is tried if minikube is on PATH.
/// 3. `minishift docker-env` is tried if minikube is absent or failed.
///
/// A run fails when it exits non-zero or writes anything to stderr.
/// Failures are logged and reported in the outcome, never returned as errors.
pub async fn auto_configure_docker_env<R>(
    env: &mut EnvContext,
    platform: Platform,
    runner: &R,
) -> DockerEnvOutcome
where
    R: HelperRunner + ?Sized,
{
    if let Some(variable) = EXPLICIT_DOCKER_VARS.iter().find(|v| env.contains(v)) {
        tracing::debug!("{} already set, skipping docker-env detection", variable);
        return DockerEnvOutcome::AlreadyConfigured {
            variable: (*variable).to_string(),
        };
    }

    let mut last_failure = None;

    for helper in Helper::ALL {
        let Some(program) = runner.locate(helper, env, platform) else {
            continue;
        };

        let result = match runner.docker_env(helper, &program, env).await {
            Ok(result) => result,
            Err(e) => ShellResult::new(-1, "", e.to_string()),
        };

        if !result.clean() {
            tracing::warn!(
                "{} docker-env failed (exit {}): {}",
                helper,
                result.exit_code,
                result.stderr.trim()
            );
            last_failure = Some(DockerEnvOutcome::HelperFailed {
                helper,
                exit_code: result.exit_code,
                stderr: result.stderr,
            });
            continue;
        }

        let exports = parse_docker_env(&result.stdout);
        for line in &exports.skipped {
            tracing::debug!("Ignoring {} docker-env line: {}", helper, line);
        }
        for (name, value) in &exports.vars {
            tracing::debug!("Setting {} from {} docker-env", name, helper);
            env.set(name.clone(), value.clone());
        }
        tracing::info!(
            "Configured Docker environment from {} ({} variable(s))",
            helper,
            exports.vars.len()
        );

        return DockerEnvOutcome::Configured {
            helper,
            applied: exports.vars,
            skipped_lines: exports.skipped,
        };
    }

    last_failure.unwrap_or_else(|| {
        tracing::debug!("No docker-env helper found on PATH");
        DockerEnvOutcome::NoHelper
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KubeshellError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned helper runner recording which helpers ran.
    struct FakeRunner {
        installed: HashMap<Helper, ShellResult>,
        spawn_errors: Vec<Helper>,
        calls: Mutex<Vec<Helper>>,
    }

    impl FakeRunner {
        fn new() -> Self {
            Self {
                installed: HashMap::new(),
                spawn_errors: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with(mut self, helper: Helper, result: ShellResult) -> Self {
            self.installed.insert(helper, result);
            self
        }

        fn calls(&self) -> Vec<Helper> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HelperRunner for FakeRunner {
        fn locate(&self, helper: Helper, _env: &EnvContext, _platform: Platform) -> Option<PathBuf> {
            (self.installed.contains_key(&helper) || self.spawn_errors.contains(&helper))
                .then(|| PathBuf::from(format!("/fake/bin/{}", helper)))
        }

        async fn docker_env(&self, helper: Helper, program: &Path, _env: &EnvContext) -> Result<ShellResult> {
            self.calls.lock().unwrap().push(helper);
            if self.spawn_errors.contains(&helper) {
                return Err(KubeshellError::SpawnFailed {
                    command: program.display().to_string(),
                    message: "permission denied".into(),
                });
            }
            Ok(self.installed[&helper].clone())
        }
    }

    const MINIKUBE_OUTPUT: &str = "export DOCKER_TLS_VERIFY=\"1\"\n\
export DOCKER_HOST=\"tcp://192.168.99.100:2376\"\n\
export DOCKER_CERT_PATH=\"/home/me/.minikube/certs\"\n\
export MINIKUBE_ACTIVE_DOCKERD=\"minikube\"\n\
\n\
# To point your shell to minikube's docker-daemon, run:\n\
# eval $(minikube -p minikube docker-env)\n";

    #[test]
    fn parses_export_lines_and_strips_quotes() {
        let exports = parse_docker_env(MINIKUBE_OUTPUT);
        assert_eq!(exports.vars.len(), 4);
        assert_eq!(
            exports.vars[1],
            ("DOCKER_HOST".to_string(), "tcp://192.168.99.100:2376".to_string())
        );
        assert_eq!(exports.skipped.len(), 2);
    }

    #[test]
    fn strips_quotes_anywhere_in_value() {
        let exports = parse_docker_env("export A=\"x\"y\"z\"\n");
        assert_eq!(exports.vars, vec![("A".to_string(), "xyz".to_string())]);
    }

    #[test]
    fn keeps_unquoted_and_empty_values() {
        let exports = parse_docker_env("export A=plain\nexport B=\n");
        assert_eq!(
            exports.vars,
            vec![
                ("A".to_string(), "plain".to_string()),
                ("B".to_string(), String::new())
            ]
        );
    }

    #[test]
    fn rejects_names_with_other_characters() {
        let exports = parse_docker_env("export DOCKER-HOST=x\nset DOCKER_HOST=y\n");
        assert!(exports.vars.is_empty());
        assert_eq!(exports.skipped.len(), 2);
    }

    #[test]
    fn handles_crlf_output() {
        let exports = parse_docker_env("export DOCKER_HOST=\"tcp://h:2376\"\r\n");
        assert_eq!(exports.vars[0].1, "tcp://h:2376");
    }

    #[test]
    fn empty_output_yields_nothing() {
        assert_eq!(parse_docker_env(""), DockerEnvExports::default());
    }

    #[tokio::test]
    async fn explicit_docker_host_wins() {
        let mut env = EnvContext::from_pairs([("DOCKER_HOST", "tcp://mine:2375")]);
        let before = env.clone();
        let runner = FakeRunner::new().with(Helper::Minikube, ShellResult::new(0, MINIKUBE_OUTPUT, ""));

        let outcome = auto_configure_docker_env(&mut env, Platform::Linux, &runner).await;

        assert_eq!(
            outcome,
            DockerEnvOutcome::AlreadyConfigured {
                variable: "DOCKER_HOST".to_string()
            }
        );
        assert!(!outcome.configured());
        assert_eq!(env, before);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn explicit_cert_path_wins() {
        let mut env = EnvContext::from_pairs([("DOCKER_CERT_PATH", "/certs")]);
        let runner = FakeRunner::new().with(Helper::Minikube, ShellResult::new(0, MINIKUBE_OUTPUT, ""));

        let outcome = auto_configure_docker_env(&mut env, Platform::Linux, &runner).await;

        assert!(matches!(outcome, DockerEnvOutcome::AlreadyConfigured { .. }));
        assert!(!env.contains("DOCKER_HOST"));
    }

    #[tokio::test]
    async fn minikube_output_is_applied() {
        let mut env = EnvContext::new();
        let runner = FakeRunner::new().with(
            Helper::Minikube,
            ShellResult::new(0, "export DOCKER_HOST=\"tcp://1.2.3.4:2376\"\n", ""),
        );

        let outcome = auto_configure_docker_env(&mut env, Platform::Linux, &runner).await;

        assert!(outcome.configured());
        assert_eq!(env.get("DOCKER_HOST"), Some("tcp://1.2.3.4:2376"));
        assert_eq!(runner.calls(), vec![Helper::Minikube]);
    }

    #[tokio::test]
    async fn minikube_preferred_over_minishift() {
        let mut env = EnvContext::new();
        let runner = FakeRunner::new()
            .with(Helper::Minikube, ShellResult::new(0, "export DOCKER_HOST=mk\n", ""))
            .with(Helper::Minishift, ShellResult::new(0, "export DOCKER_HOST=ms\n", ""));

        auto_configure_docker_env(&mut env, Platform::Linux, &runner).await;

        assert_eq!(env.get("DOCKER_HOST"), Some("mk"));
        assert_eq!(runner.calls(), vec![Helper::Minikube]);
    }

    #[tokio::test]
    async fn falls_back_to_minishift_on_minikube_stderr() {
        let mut env = EnvContext::new();
        let runner = FakeRunner::new()
            .with(
                Helper::Minikube,
                ShellResult::new(0, "export DOCKER_HOST=mk\n", "host is not running"),
            )
            .with(Helper::Minishift, ShellResult::new(0, "export DOCKER_HOST=ms\n", ""));

        let outcome = auto_configure_docker_env(&mut env, Platform::Linux, &runner).await;

        assert!(matches!(
            outcome,
            DockerEnvOutcome::Configured {
                helper: Helper::Minishift,
                ..
            }
        ));
        assert_eq!(env.get("DOCKER_HOST"), Some("ms"));
        assert_eq!(runner.calls(), vec![Helper::Minikube, Helper::Minishift]);
    }

    #[tokio::test]
    async fn minishift_used_when_minikube_absent() {
        let mut env = EnvContext::new();
        let runner =
            FakeRunner::new().with(Helper::Minishift, ShellResult::new(0, "export DOCKER_HOST=ms\n", ""));

        let outcome = auto_configure_docker_env(&mut env, Platform::Linux, &runner).await;

        assert!(outcome.configured());
        assert_eq!(runner.calls(), vec![Helper::Minishift]);
    }

    #[tokio::test]
    async fn no_helper_is_explicit_outcome() {
        let mut env = EnvContext::from_pairs([("PATH", "/usr/bin")]);
        let before = env.clone();

        let outcome = auto_configure_docker_env(&mut env, Platform::Linux, &FakeRunner::new()).await;

        assert_eq!(outcome, DockerEnvOutcome::NoHelper);
        assert!(!outcome.configured());
        assert_eq!(env, before);
    }

    #[tokio::test]
    async fn minikube_failure_without_minishift_reports_failure() {
        let mut env = EnvContext::new();
        let runner = FakeRunner::new().with(
            Helper::Minikube,
            ShellResult::new(1, "", "minikube is not running"),
        );

        let outcome = auto_configure_docker_env(&mut env, Platform::Linux, &runner).await;

        assert_eq!(
            outcome,
            DockerEnvOutcome::HelperFailed {
                helper: Helper::Minikube,
                exit_code: 1,
                stderr: "minikube is not running".to_string(),
            }
        );
        assert!(env.is_empty());
    }

    #[tokio::test]
    async fn both_helpers_failing_reports_last() {
        let mut env = EnvContext::new();
        let runner = FakeRunner::new()
            .with(Helper::Minikube, ShellResult::new(1, "", "mk down"))
            .with(Helper::Minishift, ShellResult::new(2, "", "ms down"));

        let outcome = auto_configure_docker_env(&mut env, Platform::Linux, &runner).await;

        assert!(matches!(
            outcome,
            DockerEnvOutcome::HelperFailed {
                helper: Helper::Minishift,
                exit_code: 2,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn spawn_error_counts_as_helper_failure() {
        let mut env = EnvContext::new();
        let mut runner = FakeRunner::new();
        runner.spawn_errors.push(Helper::Minikube);

        let outcome = auto_configure_docker_env(&mut env, Platform::Linux, &runner).await;

        match outcome {
            DockerEnvOutcome::HelperFailed {
                helper,
                exit_code,
                stderr,
            } => {
                assert_eq!(helper, Helper::Minikube);
                assert_eq!(exit_code, -1);
                assert!(stderr.contains("permission denied"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn unmatched_lines_are_skipped_not_fatal() {
        let mut env = EnvContext::new();
        let runner = FakeRunner::new().with(Helper::Minikube, ShellResult::new(0, MINIKUBE_OUTPUT, ""));

        let outcome = auto_configure_docker_env(&mut env, Platform::Linux, &runner).await;

        match outcome {
            DockerEnvOutcome::Configured {
                applied,
                skipped_lines,
                ..
            } => {
                assert_eq!(applied.len(), 4);
                assert_eq!(skipped_lines.len(), 2);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(env.get("DOCKER_CERT_PATH"), Some("/home/me/.minikube/certs"));
        assert_eq!(env.get("DOCKER_TLS_VERIFY"), Some("1"));
    }

    #[test]
    fn outcome_display() {
        assert!(DockerEnvOutcome::NoHelper.to_string().contains("minikube"));
        let failed = DockerEnvOutcome::HelperFailed {
            helper: Helper::Minishift,
            exit_code: 1,
            stderr: "stopped\n".into(),
        };
        assert_eq!(failed.to_string(), "minishift docker-env failed (exit 1): stopped");
    }
}
