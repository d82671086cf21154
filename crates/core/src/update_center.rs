//! The plugin catalog loaded from update-center metadata.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::plugin::Plugin;
use crate::version::Version;

/// The set of plugins known to the update center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCenter {
    /// Path to the metadata file.
    pub path: PathBuf,

    /// Plugins keyed by plugin key.
    pub plugins: BTreeMap<String, Plugin>,

    /// Known platform versions.
    pub sonar_versions: Vec<Version>,
}

impl UpdateCenter {
    /// Creates a new empty catalog.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            plugins: BTreeMap::new(),
            sonar_versions: Vec::new(),
        }
    }

    /// Adds a plugin, replacing any plugin with the same key.
    pub fn add_plugin(&mut self, plugin: Plugin) {
        self.plugins.insert(plugin.key.clone(), plugin);
    }

    /// Sets the known platform versions.
    pub fn set_sonar_versions(&mut self, versions: Vec<Version>) {
        self.sonar_versions = versions;
    }

    /// Gets a plugin by key.
    pub fn get_plugin(&self, key: &str) -> Option<&Plugin> {
        self.plugins.get(key)
    }

    /// Iterates over all plugins, ordered by key.
    pub fn plugins(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.values()
    }

    /// Returns all plugin keys.
    pub fn plugin_keys(&self) -> Vec<&str> {
        self.plugins.keys().map(|s| s.as_str()).collect()
    }

    /// Returns the number of plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns true if the catalog holds no plugins.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Default for UpdateCenter {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get_plugin() {
        let mut center = UpdateCenter::default();
        center.add_plugin(Plugin::new("pmd"));
        center.add_plugin(Plugin::new("checkstyle").with_name("Checkstyle"));

        assert_eq!(center.len(), 2);
        assert_eq!(center.plugin_keys(), vec!["checkstyle", "pmd"]);
        assert_eq!(center.get_plugin("checkstyle").unwrap().name, "Checkstyle");
        assert!(center.get_plugin("findbugs").is_none());
    }

    #[test]
    fn test_replaces_plugin_with_same_key() {
        let mut center = UpdateCenter::default();
        center.add_plugin(Plugin::new("pmd").with_name("Old"));
        center.add_plugin(Plugin::new("pmd").with_name("New"));

        assert_eq!(center.len(), 1);
        assert_eq!(center.get_plugin("pmd").unwrap().name, "New");
    }

    #[test]
    fn test_empty() {
        assert!(UpdateCenter::default().is_empty());
    }
}
