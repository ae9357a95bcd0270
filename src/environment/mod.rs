//! Child-process environment assembly.
//!
//! An [`EnvContext`] is built up explicitly and handed to the shell layer.
//! Nothing here touches the process environment except
//! [`EnvContext::apply_to_process`].
//!
//! - [`context`] holds the variable map and PATH editing
//! - [`probe`] finds executables on a PATH
//! - [`docker_env`] fills in Docker variables from minikube or minishift
//! - [`options`] puts it together into [`ExecutionOptions`](crate::shell::ExecutionOptions)

pub mod context;
pub mod docker_env;
pub mod options;
pub mod probe;

pub use context::EnvContext;
pub use docker_env::{
    auto_configure_docker_env, parse_docker_env, DockerEnvExports, DockerEnvOutcome, Helper,
    HelperRunner, ProcessHelperRunner, EXPLICIT_DOCKER_VARS,
};
pub use options::{ExecutionOptionsBuilder, Tool, KUBECONFIG_VAR};
pub use probe::{find_executable, is_executable, resolve_tool_path};
