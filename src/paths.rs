//! Namespace search paths.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::name::WILDCARD;

/// Maps a namespace to the ordered directories its templates are searched in.
pub trait PathProvider {
    fn get(&self, namespace: &str) -> Vec<PathBuf>;
}

/// In-memory set of search paths per namespace.
///
/// The wildcard namespace `*` holds the paths for unqualified references.
/// An unknown namespace has no paths.
#[derive(Debug, Clone, Default)]
pub struct PathSet {
    namespaces: BTreeMap<String, Vec<PathBuf>>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`PathSet::add`] for several paths.
    pub fn with_paths<I, P>(mut self, namespace: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let namespace = namespace.into();
        for path in paths {
            self.add(namespace.clone(), path);
        }
        self
    }

    /// Append a search path to a namespace.
    pub fn add(&mut self, namespace: impl Into<String>, path: impl Into<PathBuf>) {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .push(path.into());
    }

    /// Append a search path to the wildcard namespace.
    pub fn add_default(&mut self, path: impl Into<PathBuf>) {
        self.add(WILDCARD, path);
    }

    /// Configured namespace names.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }
}

impl PathProvider for PathSet {
    fn get(&self, namespace: &str) -> Vec<PathBuf> {
        self.namespaces.get(namespace).cloned().unwrap_or_default()
    }
}

impl From<BTreeMap<String, Vec<PathBuf>>> for PathSet {
    fn from(namespaces: BTreeMap<String, Vec<PathBuf>>) -> Self {
        Self { namespaces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_paths_in_order() {
        let paths = PathSet::new().with_paths("admin", ["/a", "/b"]);
        assert_eq!(
            paths.get("admin"),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn unknown_namespace_has_no_paths() {
        let paths = PathSet::new().with_paths("*", ["/a"]);
        assert!(paths.get("admin").is_empty());
    }

    #[test]
    fn add_default_targets_wildcard() {
        let mut paths = PathSet::new();
        paths.add_default("/templates");
        assert_eq!(paths.get("*"), vec![PathBuf::from("/templates")]);
        assert_eq!(paths.namespaces().collect::<Vec<_>>(), vec!["*"]);
    }
}
