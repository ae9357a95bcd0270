//! Explicit environment mapping.
//!
//! [`EnvContext`] stands in for the process environment while execution
//! options are assembled. Resolution writes into the context instead of
//! calling `std::env::set_var`; only the binary's top level copies the
//! result back into the process with [`EnvContext::apply_to_process`].

use std::collections::BTreeMap;

use crate::shell::Platform;

/// An owned set of environment variables.
///
/// Keys keep their original spelling. Lookups are exact; use
/// [`EnvContext::path_variable_name`] to find the PATH key on Windows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvContext {
    vars: BTreeMap<String, String>,
}

impl EnvContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are dropped.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Build a context from name/value pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use kubeshell::environment::EnvContext;
    ///
    /// let env = EnvContext::from_pairs([("PATH", "/usr/bin"), ("HOME", "/home/me")]);
    /// assert_eq!(env.get("HOME"), Some("/home/me"));
    /// ```
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether `key` is set. An empty value still counts as set.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Set a variable, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.vars.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The PATH-equivalent key for `platform` within this context.
    pub fn path_variable_name(&self, platform: Platform) -> String {
        platform.path_variable_name(self.vars.keys().map(String::as_str))
    }

    /// Current PATH-equivalent value, if any.
    pub fn path_value(&self, platform: Platform) -> Option<&str> {
        self.get(&self.path_variable_name(platform))
    }

    /// Individual PATH entries, skipping empty ones.
    pub fn path_entries(&self, platform: Platform) -> Vec<String> {
        self.path_value(platform)
            .map(|path| {
                path.split(platform.path_entry_separator())
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Put `dir` in front of the PATH-equivalent variable.
    ///
    /// No trailing separator is added when PATH is unset or empty.
    pub fn prepend_path(&mut self, platform: Platform, dir: &str) {
        let key = self.path_variable_name(platform);
        let value = match self.vars.get(&key) {
            Some(current) if !current.is_empty() => {
                format!("{}{}{}", dir, platform.path_entry_separator(), current)
            }
            _ => dir.to_string(),
        };
        self.vars.insert(key, value);
    }

    /// Home directory according to this context.
    pub fn home_dir(&self, platform: Platform) -> Option<&str> {
        self.get(platform.home_variable())
    }

    /// Names of variables whose value differs from `other` or is missing there.
    pub fn changed_from(&self, other: &EnvContext) -> Vec<&str> {
        self.vars
            .iter()
            .filter(|(k, v)| other.vars.get(*k) != Some(*v))
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Copy every variable into the real process environment.
    ///
    /// Only the CLI calls this, on its single-threaded runtime, before any
    /// child process is started.
    pub fn apply_to_process(&self) {
        for (key, value) in &self.vars {
            if std::env::var(key).ok().as_deref() != Some(value.as_str()) {
                tracing::debug!("Setting {} in process environment", key);
                std::env::set_var(key, value);
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<'a> IntoIterator for &'a EnvContext {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_process_sees_existing_vars() {
        let env = EnvContext::from_process();
        assert_eq!(env.get("PATH").is_some(), std::env::var("PATH").is_ok());
    }

    #[test]
    fn set_and_get() {
        let mut env = EnvContext::new();
        assert!(env.is_empty());
        assert_eq!(env.set("A", "1"), None);
        assert_eq!(env.set("A", "2"), Some("1".to_string()));
        assert_eq!(env.get("A"), Some("2"));
        assert_eq!(env.len(), 1);
        assert_eq!(env.remove("A"), Some("2".to_string()));
        assert!(!env.contains("A"));
    }

    #[test]
    fn empty_value_counts_as_set() {
        let env = EnvContext::from_pairs([("DOCKER_HOST", "")]);
        assert!(env.contains("DOCKER_HOST"));
    }

    #[test]
    fn prepend_path_unix() {
        let mut env = EnvContext::from_pairs([("PATH", "/usr/bin:/bin")]);
        env.prepend_path(Platform::Linux, "/opt/k8s");
        assert_eq!(env.get("PATH"), Some("/opt/k8s:/usr/bin:/bin"));
    }

    #[test]
    fn prepend_path_without_existing_value() {
        let mut env = EnvContext::new();
        env.prepend_path(Platform::Linux, "/opt/k8s");
        assert_eq!(env.get("PATH"), Some("/opt/k8s"));

        let mut env = EnvContext::from_pairs([("PATH", "")]);
        env.prepend_path(Platform::MacOS, "/opt/helm");
        assert_eq!(env.get("PATH"), Some("/opt/helm"));
    }

    #[test]
    fn prepend_path_windows_reuses_existing_key() {
        let mut env = EnvContext::from_pairs([("Path", "C:\\Windows")]);
        env.prepend_path(Platform::Windows, "C:\\tools");
        assert_eq!(env.get("Path"), Some("C:\\tools;C:\\Windows"));
        assert!(!env.contains("PATH"));
    }

    #[test]
    fn path_entries_split_on_platform_separator() {
        let env = EnvContext::from_pairs([("PATH", "/a::/b")]);
        assert_eq!(env.path_entries(Platform::Linux), vec!["/a", "/b"]);

        let env = EnvContext::from_pairs([("pAtH", "C:\\a;C:\\b")]);
        assert_eq!(env.path_entries(Platform::Windows), vec!["C:\\a", "C:\\b"]);
    }

    #[test]
    fn home_dir_uses_platform_variable() {
        let env = EnvContext::from_pairs([("HOME", "/home/me"), ("USERPROFILE", "C:\\Users\\me")]);
        assert_eq!(env.home_dir(Platform::Linux), Some("/home/me"));
        assert_eq!(env.home_dir(Platform::Windows), Some("C:\\Users\\me"));
    }

    #[test]
    fn changed_from_lists_new_and_modified() {
        let before = EnvContext::from_pairs([("A", "1"), ("B", "2")]);
        let mut after = before.clone();
        after.set("B", "3");
        after.set("C", "4");
        assert_eq!(after.changed_from(&before), vec!["B", "C"]);
    }

    #[test]
    fn iter_is_sorted_by_key() {
        let env: EnvContext = [("b", "2"), ("a", "1")].into_iter().collect();
        let keys: Vec<&str> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
