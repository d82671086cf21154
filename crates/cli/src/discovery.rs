//! Config file discovery logic.

use std::path::{Path, PathBuf};

use miette::{Result, miette};

/// Default config file name.
pub const CONFIG_NAME: &str = "infowidget.toml";

/// Finds the config file by searching from the current directory upwards.
pub fn find_config() -> Result<Option<PathBuf>> {
    let cwd = std::env::current_dir().map_err(|e| miette!("Cannot get current directory: {}", e))?;
    Ok(find_config_from(&cwd))
}

/// Finds the config file starting from the given directory.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config = current.join(CONFIG_NAME);

        if config.is_file() {
            return Some(config);
        }

        // Try parent directory
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Returns the base directory for a config file (its parent directory).
pub fn base_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
