//! Path joining and file URI construction.
//!
//! These are plain string transforms keyed on a [`Platform`] rather than on
//! the host, so Windows behaviour can be exercised from any machine.

use super::platform::Platform;

/// Join `relative` onto `base` using the platform's separator.
///
/// On Windows every forward slash in `relative` becomes a backslash first.
/// Unix-like platforms join with `/` and leave `relative` untouched.
///
/// # Example
///
/// ```
/// use kubeshell::shell::{combine_path, Platform};
///
/// assert_eq!(combine_path(Platform::Linux, "/a", "b/c"), "/a/b/c");
/// assert_eq!(combine_path(Platform::Windows, "/a", "b/c"), "/a\\b\\c");
/// ```
pub fn combine_path(platform: Platform, base: &str, relative: &str) -> String {
    if platform.is_windows() {
        format!("{}\\{}", base, relative.replace('/', "\\"))
    } else {
        format!("{}/{}", base, relative)
    }
}

/// Build a `file://` URI for a local path.
///
/// # Example
///
/// ```
/// use kubeshell::shell::{file_uri, Platform};
///
/// assert_eq!(file_uri(Platform::Windows, "C:\\a\\b"), "file:///C:/a/b");
/// assert_eq!(file_uri(Platform::Linux, "/a/b"), "file:///a/b");
/// ```
pub fn file_uri(platform: Platform, path: &str) -> String {
    if platform.is_windows() {
        format!("file:///{}", path.replace('\\', "/"))
    } else {
        format!("file://{}", path)
    }
}

/// Containing directory of `path`.
///
/// Windows accepts both separators. A file at the root yields the root
/// (`/` or `C:\`), and a bare file name yields `.`.
pub fn parent_dir(platform: Platform, path: &str) -> String {
    let is_sep = |c: char| c == '/' || (platform.is_windows() && c == '\\');
    let trimmed = path.trim_end_matches(is_sep);
    if trimmed.is_empty() {
        return if path.is_empty() { ".".to_string() } else { path[..1].to_string() };
    }

    match trimmed.rfind(is_sep) {
        None => ".".to_string(),
        Some(0) => trimmed[..1].to_string(),
        Some(idx) => {
            let head = trimmed[..idx].trim_end_matches(is_sep);
            if head.is_empty() {
                trimmed[..1].to_string()
            } else if platform.is_windows() && head.len() == 2 && head.ends_with(':') {
                // Keep the separator after a drive letter: `C:\`
                trimmed[..idx + 1].to_string()
            } else {
                head.to_string()
            }
        }
    }
}
