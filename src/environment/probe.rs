//! Executable discovery.
//!
//! Helpers are looked up on the PATH of an [`EnvContext`], not the process
//! PATH, so directories prepended during option assembly are searched too.

use std::path::{Path, PathBuf};

use super::context::EnvContext;
use crate::shell::Platform;

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command; its behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Find `name` on the PATH of `env`.
///
/// # Example
///
/// ```no_run
/// use kubeshell::environment::{find_executable, EnvContext};
/// use kubeshell::shell::Platform;
///
/// let env = EnvContext::from_process();
/// if let Some(path) = find_executable("minikube", &env, Platform::current()) {
///     println!("minikube at {}", path.display());
/// }
/// ```
pub fn find_executable(name: &str, env: &EnvContext, platform: Platform) -> Option<PathBuf> {
    let entries: Vec<PathBuf> = env
        .path_entries(platform)
        .into_iter()
        .map(PathBuf::from)
        .collect();
    let found = resolve_tool_path(&platform.executable_name(name), &entries);
    match &found {
        Some(path) => tracing::debug!("Found {} at {}", name, path.display()),
        None => tracing::debug!("{} not found on PATH", name),
    }
    found
}
