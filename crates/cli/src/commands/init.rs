//! Init command implementation.

use std::fs;
use std::path::Path;

use miette::{Result, miette};

use crate::discovery::CONFIG_NAME;
use crate::output;

const TEMPLATE: &str = r#"# infowidget configuration
# Relative paths are resolved against this file's directory.

# Update-center metadata (properties format)
metadata = "update-center.properties"

# Existing directory receiving <plugin-key>.html and style.css
output = "widgets"

# Directory holding a custom plugin-info-widget-template.html and style.css.
# The bundled resources are used when this is not set.
# resources = "resources"

# Maximum number of parallel writes (0 = number of CPUs)
parallel = 0
"#;

/// Initializes a new config file in the current directory.
pub fn execute(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_NAME), force)?;

    output::success(&format!("Created {}", CONFIG_NAME));
    output::info("Run 'infowidget validate' to check your metadata");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(miette!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        ));
    }

    fs::write(path, TEMPLATE).map_err(|e| miette!("Failed to write {}: {}", path.display(), e))
}
