//! Validate command implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use infowidget_core::{UpdateCenter, Version};
use infowidget_engine::is_file_stem;
use infowidget_parser::Property;
use miette::{Result, miette};

use crate::output;

/// Validates the metadata file: syntax, catalog schema and renderability.
pub fn execute(metadata: &Path) -> Result<()> {
    output::info(&format!("Validating {}...", metadata.display()));

    let content = fs::read_to_string(metadata)
        .map_err(|e| miette!("Failed to read {}: {}", metadata.display(), e))?;

    // Syntax errors are reported with their source location
    let entries = infowidget_parser::parse_properties(&content).map_err(miette::Report::new)?;

    let catalog = match infowidget_parser::build_update_center(entries.clone(), metadata) {
        Ok(center) => center,
        Err(e) => {
            output::error(&format!("Metadata error: {}", e));
            return Err(miette!("Validation failed: {}", e));
        }
    };

    for duplicate in duplicate_versions(&entries, &catalog) {
        output::warning(&duplicate);
    }

    let problems = check_catalog(&catalog);
    for problem in &problems {
        output::error(problem);
    }
    if !problems.is_empty() {
        return Err(miette!("Validation failed: {} problem(s)", problems.len()));
    }

    if catalog.is_empty() {
        output::warning("No plugins declared");
    }

    let releases: usize = catalog.plugins().map(|p| p.releases.len()).sum();
    output::success(&format!(
        "Metadata is valid ({} plugins, {} releases)",
        catalog.len(),
        releases
    ));

    Ok(())
}

/// Returns a description of every plugin that cannot be rendered to a widget file.
fn check_catalog(catalog: &UpdateCenter) -> Vec<String> {
    let mut problems = Vec::new();

    for plugin in catalog.plugins() {
        if !is_file_stem(&plugin.key) {
            problems.push(format!(
                "Plugin key '{}' cannot be used as a file name",
                plugin.key
            ));
        }

        if plugin.last_release().is_none() {
            problems.push(format!("Plugin '{}' has no release", plugin.key));
        }
    }

    problems
}

/// Reports `<key>.versions` lists naming the same release twice, such as `1.0` and `1.0.0`.
///
/// Only the last of such versions survives in the catalog.
fn duplicate_versions(entries: &[Property], catalog: &UpdateCenter) -> Vec<String> {
    let mut lists: BTreeMap<&str, &str> = BTreeMap::new();
    for entry in entries {
        if let Some(plugin) = entry.key.strip_suffix(".versions") {
            if catalog.get_plugin(plugin).is_some() {
                lists.insert(plugin, &entry.value);
            }
        }
    }

    let mut duplicates = Vec::new();
    for (plugin, list) in lists {
        let mut seen: BTreeMap<Version, &str> = BTreeMap::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let Ok(version) = Version::parse(name) else {
                continue;
            };
            if let Some(previous) = seen.insert(version, name) {
                duplicates.push(format!(
                    "Plugin '{}' lists '{}' and '{}', which are the same release; only '{}' is kept",
                    plugin, previous, name, name
                ));
            }
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const VALID: &str = "plugins=pmd\n\
        pmd.versions=1.0\n\
        pmd.1.0.date=2024-01-05\n\
        pmd.1.0.downloadUrl=http://x/pmd.jar\n\
        pmd.1.0.requiredSonarVersions=2.0\n";

    fn write(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("update-center.properties");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_valid_metadata() {
        let (_dir, path) = write(VALID);
        assert!(execute(&path).is_ok());
    }

    #[test]
    fn test_plugin_without_release() {
        let (_dir, path) = write("plugins=pmd,empty\n");
        assert!(execute(&path).is_err());
    }

    #[test]
    fn test_syntax_error() {
        let (_dir, path) = write("plugins=pmd\n=oops\n");
        assert!(execute(&path).is_err());
    }

    #[test]
    fn test_check_catalog_rejects_path_keys() {
        let catalog = infowidget_parser::parse_str(
            "plugins=../evil\n\
             ../evil.versions=1.0\n\
             ../evil.1.0.date=2024-01-05\n\
             ../evil.1.0.downloadUrl=http://x\n\
             ../evil.1.0.requiredSonarVersions=2.0\n",
        )
        .unwrap();

        let problems = check_catalog(&catalog);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("file name"));
    }

    #[test]
    fn test_duplicate_versions() {
        let entries = infowidget_parser::parse_properties(
            "plugins=pmd,checkstyle\n\
             sonar.versions=2.0,2.0.0\n\
             pmd.versions=1.0,1.1,1.0.0\n\
             checkstyle.versions=1.0,2.0\n",
        )
        .unwrap();
        let mut catalog = UpdateCenter::default();
        catalog.add_plugin(infowidget_core::Plugin::new("pmd"));
        catalog.add_plugin(infowidget_core::Plugin::new("checkstyle"));

        let duplicates = duplicate_versions(&entries, &catalog);
        assert_eq!(duplicates.len(), 1);
        assert!(duplicates[0].contains("'pmd'"));
        assert!(duplicates[0].contains("'1.0' and '1.0.0'"));
    }

    #[test]
    fn test_duplicate_versions_is_only_a_warning() {
        let (_dir, path) = write(&format!(
            "{}pmd.versions=1.0,1.0.0\n\
             pmd.1.0.0.date=2024-01-05\n\
             pmd.1.0.0.downloadUrl=http://x/pmd.jar\n\
             pmd.1.0.0.requiredSonarVersions=2.0\n",
            VALID
        ));
        assert!(execute(&path).is_ok());
    }
}
