//! Configuration layering: defaults, `infowidget.toml`, then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use miette::{Result, miette};
use serde::Deserialize;

use crate::discovery;

/// Metadata file used when neither config nor flags name one.
pub const DEFAULT_METADATA: &str = "update-center.properties";

/// Output directory used when neither config nor flags name one.
pub const DEFAULT_OUTPUT: &str = "widgets";

/// Contents of `infowidget.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub metadata: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub resources: Option<PathBuf>,
    pub parallel: Option<usize>,
}

/// Command-line overrides for the config file.
#[derive(Debug, Default, Clone, Args)]
pub struct SourceArgs {
    /// Update-center metadata file
    #[arg(short = 'm', long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Existing directory receiving the widgets
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Directory holding a custom template and style.css
    #[arg(short = 'r', long, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// Maximum number of parallel writes (0 = number of CPUs)
    #[arg(short = 'j', long)]
    pub parallel: Option<usize>,
}

impl SourceArgs {
    /// Fills flags left unset from `fallback`.
    pub fn or(self, fallback: SourceArgs) -> Self {
        Self {
            metadata: self.metadata.or(fallback.metadata),
            output: self.output.or(fallback.output),
            resources: self.resources.or(fallback.resources),
            parallel: self.parallel.or(fallback.parallel),
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub metadata: PathBuf,
    pub output: PathBuf,
    pub resources: Option<PathBuf>,
    pub parallel: usize,
}

impl FileConfig {
    /// Loads a config file, resolving relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| miette!("Failed to read {}: {}", path.display(), e))?;
        let config: FileConfig = toml::from_str(&content)
            .map_err(|e| miette!("Invalid config {}: {}", path.display(), e))?;

        Ok(config.relative_to(&discovery::base_dir(path)))
    }

    fn relative_to(self, base: &Path) -> Self {
        let join = |p: Option<PathBuf>| p.map(|p| if p.is_absolute() { p } else { base.join(p) });
        Self {
            metadata: join(self.metadata),
            output: join(self.output),
            resources: join(self.resources),
            parallel: self.parallel,
        }
    }
}

/// Resolves settings from an optional config file and command-line flags.
pub fn resolve(config_path: Option<&Path>, args: SourceArgs) -> Result<Settings> {
    let file = match config_path {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    Ok(merge(file, args))
}

/// Merges config values with flags; flags win.
fn merge(file: FileConfig, args: SourceArgs) -> Settings {
    Settings {
        metadata: args
            .metadata
            .or(file.metadata)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_METADATA)),
        output: args
            .output
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        resources: args.resources.or(file.resources),
        parallel: args.parallel.or(file.parallel).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = resolve(None, SourceArgs::default()).unwrap();
        assert_eq!(settings.metadata, PathBuf::from(DEFAULT_METADATA));
        assert_eq!(settings.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(settings.resources, None);
        assert_eq!(settings.parallel, 0);
    }

    #[test]
    fn test_file_paths_are_relative_to_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("infowidget.toml");
        fs::write(
            &path,
            "metadata = \"meta/uc.properties\"\noutput = \"/abs/out\"\nparallel = 4\n",
        )
        .unwrap();

        let settings = resolve(Some(&path), SourceArgs::default()).unwrap();
        assert_eq!(settings.metadata, dir.path().join("meta/uc.properties"));
        assert_eq!(settings.output, PathBuf::from("/abs/out"));
        assert_eq!(settings.parallel, 4);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("infowidget.toml");
        fs::write(&path, "metadata = \"a.properties\"\nresources = \"res\"\n").unwrap();

        let args = SourceArgs {
            metadata: Some(PathBuf::from("b.properties")),
            parallel: Some(2),
            ..Default::default()
        };
        let settings = resolve(Some(&path), args).unwrap();

        assert_eq!(settings.metadata, PathBuf::from("b.properties"));
        assert_eq!(settings.resources, Some(dir.path().join("res")));
        assert_eq!(settings.parallel, 2);
    }

    #[test]
    fn test_subcommand_flags_fall_back_to_top_level() {
        let top = SourceArgs {
            metadata: Some(PathBuf::from("top.properties")),
            output: Some(PathBuf::from("out")),
            ..Default::default()
        };
        let sub = SourceArgs {
            metadata: Some(PathBuf::from("sub.properties")),
            ..Default::default()
        };

        let settings = resolve(None, sub.or(top)).unwrap();
        assert_eq!(settings.metadata, PathBuf::from("sub.properties"));
        assert_eq!(settings.output, PathBuf::from("out"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("infowidget.toml");
        fs::write(&path, "templte = \"x\"\n").unwrap();

        assert!(resolve(Some(&path), SourceArgs::default()).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempdir().unwrap();
        assert!(resolve(Some(&dir.path().join("nope.toml")), SourceArgs::default()).is_err());
    }
}
