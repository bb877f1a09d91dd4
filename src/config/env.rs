//! Environment variable lookup used by `&NAME&` substitution.
//!
//! `EnvSource` lets substitution run against the real process environment
//! ([`ProcessEnv`]) or a fixed in-memory set of variables ([`MapEnv`]).

use std::collections::HashMap;

/// Read-only access to environment variables.
pub trait EnvSource {
    /// Value of `name`, or `None` when it is not set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        if name.is_empty() || name.contains(|c: char| c == '=' || c == '\0') {
            return None;
        }
        std::env::var(name).ok()
    }
}

/// An in-memory environment.
///
/// # Example
/// ```
/// use helix_maps::config::{EnvSource, MapEnv};
///
/// let env = MapEnv::new().with("HOME", "/x");
/// assert_eq!(env.var("HOME").as_deref(), Some("/x"));
/// assert_eq!(env.var("PATH"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_env_rejects_invalid_names() {
        assert_eq!(ProcessEnv.var(""), None);
        assert_eq!(ProcessEnv.var("A=B"), None);
        assert_eq!(ProcessEnv.var("A\0B"), None);
    }

    #[test]
    fn test_map_env() {
        let mut env: MapEnv = [("A", "1")].into_iter().collect();
        assert_eq!(env.var("A").as_deref(), Some("1"));
        env.remove("A");
        assert_eq!(env.var("A"), None);
    }
}
