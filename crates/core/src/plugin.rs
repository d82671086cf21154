//! Plugin and release records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::version::Version;

/// A plugin tracked by the update center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plugin {
    /// Unique key, also the stem of the generated widget file.
    pub key: String,

    /// Display name.
    pub name: String,

    /// License name.
    pub license: Option<String>,

    /// Issue tracker URL.
    pub issue_tracker_url: Option<String>,

    /// Short description.
    pub description: Option<String>,

    /// Homepage URL.
    pub homepage_url: Option<String>,

    /// Organization maintaining the plugin.
    pub organization: Option<String>,

    /// Releases ordered by version.
    pub releases: BTreeMap<Version, Release>,
}

/// A published version of a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Release version.
    pub version: Version,

    /// Publication date.
    pub date: NaiveDate,

    /// Artifact download URL.
    pub download_url: String,

    /// Minimum platform version this release runs on.
    pub minimum_sonar_version: Version,

    /// Source repository URL.
    pub sources_url: Option<String>,

    /// Developer names, in declaration order.
    pub developers: Vec<String>,

    /// Changelog URL.
    pub changelog_url: Option<String>,

    /// Release notes.
    pub description: Option<String>,
}

impl Plugin {
    /// Creates a new plugin with the given key. The name defaults to the key.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
            license: None,
            issue_tracker_url: None,
            description: None,
            homepage_url: None,
            organization: None,
            releases: BTreeMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the license.
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Sets the issue tracker URL.
    pub fn with_issue_tracker_url(mut self, url: impl Into<String>) -> Self {
        self.issue_tracker_url = Some(url.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the homepage URL.
    pub fn with_homepage_url(mut self, url: impl Into<String>) -> Self {
        self.homepage_url = Some(url.into());
        self
    }

    /// Sets the organization.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Adds a release.
    pub fn with_release(mut self, release: Release) -> Self {
        self.add_release(release);
        self
    }

    /// Adds a release, replacing any release with the same version.
    ///
    /// Versions compare numerically, so `1.0` and `1.0.0` are the same release
    /// and adding the second replaces the first.
    pub fn add_release(&mut self, release: Release) {
        self.releases.insert(release.version.clone(), release);
    }

    /// Returns the most recent release (highest version).
    pub fn last_release(&self) -> Option<&Release> {
        self.releases.values().next_back()
    }

    /// Gets a release by version.
    pub fn get_release(&self, version: &Version) -> Option<&Release> {
        self.releases.get(version)
    }
}

impl Release {
    /// Creates a new release.
    pub fn new(
        version: Version,
        date: NaiveDate,
        download_url: impl Into<String>,
        minimum_sonar_version: Version,
    ) -> Self {
        Self {
            version,
            date,
            download_url: download_url.into(),
            minimum_sonar_version,
            sources_url: None,
            developers: Vec::new(),
            changelog_url: None,
            description: None,
        }
    }

    /// Sets the sources URL.
    pub fn with_sources_url(mut self, url: impl Into<String>) -> Self {
        self.sources_url = Some(url.into());
        self
    }

    /// Sets the developers.
    pub fn with_developers(mut self, developers: Vec<String>) -> Self {
        self.developers = developers;
        self
    }

    /// Sets the changelog URL.
    pub fn with_changelog_url(mut self, url: impl Into<String>) -> Self {
        self.changelog_url = Some(url.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(version: &str) -> Release {
        Release::new(
            Version::parse(version).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            format!("http://example.com/{}.jar", version),
            Version::parse("3.0").unwrap(),
        )
    }

    #[test]
    fn test_name_defaults_to_key() {
        let plugin = Plugin::new("checkstyle");
        assert_eq!(plugin.name, "checkstyle");
        assert_eq!(plugin.with_name("Checkstyle").name, "Checkstyle");
    }

    #[test]
    fn test_last_release_is_highest_version() {
        let plugin = Plugin::new("pmd")
            .with_release(release("1.10"))
            .with_release(release("1.9"))
            .with_release(release("1.10-RC1"));

        assert_eq!(plugin.last_release().unwrap().version.name(), "1.10");
    }

    #[test]
    fn test_no_release() {
        assert!(Plugin::new("empty").last_release().is_none());
    }

    #[test]
    fn test_get_release() {
        let plugin = Plugin::new("pmd").with_release(release("2.0"));
        let version = Version::parse("2.0").unwrap();
        assert!(plugin.get_release(&version).is_some());
    }

    #[test]
    fn test_equal_versions_collapse() {
        let plugin = Plugin::new("pmd")
            .with_release(release("1.0"))
            .with_release(release("1.0.0"));

        assert_eq!(plugin.releases.len(), 1);
        assert_eq!(plugin.last_release().unwrap().version.name(), "1.0.0");
    }
}
