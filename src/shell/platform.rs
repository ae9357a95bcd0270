//! Host platform detection.

use std::fmt;
use std::str::FromStr;

use crate::error::KubeshellError;

/// Operating system family the shim runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOS,
    Linux,
    Unsupported,
}

impl Platform {
    /// Map an OS identifier to a platform.
    ///
    /// Accepts both Rust (`windows`, `macos`, `linux`) and Node-style
    /// (`win32`, `darwin`) identifiers. Anything else is `Unsupported`.
    ///
    /// # Example
    ///
    /// ```
    /// use kubeshell::shell::Platform;
    ///
    /// assert_eq!(Platform::from_os_identifier("darwin"), Platform::MacOS);
    /// assert_eq!(Platform::from_os_identifier("haiku"), Platform::Unsupported);
    /// ```
    pub fn from_os_identifier(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "windows" | "win32" => Platform::Windows,
            "macos" | "darwin" => Platform::MacOS,
            "linux" => Platform::Linux,
            _ => Platform::Unsupported,
        }
    }

    /// Platform of the running process.
    pub fn current() -> Self {
        Self::from_os_identifier(std::env::consts::OS)
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }

    /// Everything that is not Windows, including unsupported hosts.
    pub fn is_unix(self) -> bool {
        !self.is_windows()
    }

    /// Name of the variable holding the user's home directory.
    pub fn home_variable(self) -> &'static str {
        if self.is_windows() {
            "USERPROFILE"
        } else {
            "HOME"
        }
    }

    /// Separator between entries of the PATH variable.
    pub fn path_entry_separator(self) -> char {
        if self.is_windows() {
            ';'
        } else {
            ':'
        }
    }

    /// Separator between path components.
    pub fn dir_separator(self) -> char {
        if self.is_windows() {
            '\\'
        } else {
            '/'
        }
    }

    /// Find the PATH-equivalent variable among the given keys.
    ///
    /// Windows variable names are case-insensitive and the key is often
    /// spelled `Path`, so the existing spelling is reused. Other platforms
    /// always use `PATH`.
    pub fn path_variable_name<'a>(self, keys: impl IntoIterator<Item = &'a str>) -> String {
        if self.is_windows() {
            if let Some(key) = keys.into_iter().find(|k| k.eq_ignore_ascii_case("path")) {
                return key.to_string();
            }
        }
        "PATH".to_string()
    }

    /// File name of an executable on this platform.
    pub fn executable_name(self, name: &str) -> String {
        if self.is_windows() && !name.to_lowercase().ends_with(".exe") {
            format!("{}.exe", name)
        } else {
            name.to_string()
        }
    }

    /// Lowercase identifier used in output and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOS => "macos",
            Platform::Linux => "linux",
            Platform::Unsupported => "unsupported",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = KubeshellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("unsupported") {
            return Ok(Platform::Unsupported);
        }
        match Platform::from_os_identifier(s) {
            Platform::Unsupported => Err(KubeshellError::UnknownPlatform {
                name: s.to_string(),
            }),
            platform => Ok(platform),
        }
    }
}

/// Check if the running process is on Windows.
pub fn is_windows() -> bool {
    Platform::current().is_windows()
}

/// Check if the running process is on a Unix-like system.
pub fn is_unix() -> bool {
    Platform::current().is_unix()
}
