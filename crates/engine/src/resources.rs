//! Template and stylesheet resources.

use std::fs;
use std::path::{Path, PathBuf};

use infowidget_core::{Result, WidgetError};

/// File name of the widget template.
pub const TEMPLATE_NAME: &str = "plugin-info-widget-template.html";

/// File name of the stylesheet, both as a resource and in the output directory.
pub const STYLESHEET_NAME: &str = "style.css";

const EMBEDDED_TEMPLATE: &str = include_str!("../resources/plugin-info-widget-template.html");
const EMBEDDED_STYLESHEET: &str = include_str!("../resources/style.css");

/// Supplies the widget template and stylesheet to the generator.
pub trait ResourceProvider: Send + Sync {
    /// Loads the HTML template.
    fn template(&self) -> Result<String>;

    /// Loads the stylesheet bytes.
    fn stylesheet(&self) -> Result<Vec<u8>>;
}

/// Resources compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

impl ResourceProvider for EmbeddedResources {
    fn template(&self) -> Result<String> {
        Ok(EMBEDDED_TEMPLATE.to_string())
    }

    fn stylesheet(&self) -> Result<Vec<u8>> {
        Ok(EMBEDDED_STYLESHEET.as_bytes().to_vec())
    }
}

/// Resources read from a directory holding `plugin-info-widget-template.html`
/// and `style.css`.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    dir: PathBuf,
}

impl DirectoryResources {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        fs::read(self.dir.join(name)).map_err(|source| WidgetError::Resource {
            name: name.to_string(),
            source,
        })
    }
}

impl ResourceProvider for DirectoryResources {
    fn template(&self) -> Result<String> {
        let bytes = self.read(TEMPLATE_NAME)?;
        String::from_utf8(bytes).map_err(|e| WidgetError::Resource {
            name: TEMPLATE_NAME.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })
    }

    fn stylesheet(&self) -> Result<Vec<u8>> {
        self.read(STYLESHEET_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Placeholder;
    use tempfile::tempdir;

    #[test]
    fn test_embedded_template_has_every_placeholder() {
        let template = EmbeddedResources.template().unwrap();
        for placeholder in Placeholder::ALL {
            assert!(
                template.contains(placeholder.token()),
                "missing {}",
                placeholder.token()
            );
        }
    }

    #[test]
    fn test_embedded_stylesheet() {
        assert!(!EmbeddedResources.stylesheet().unwrap().is_empty());
    }

    #[test]
    fn test_directory_resources() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(TEMPLATE_NAME), "<p>%name%</p>").unwrap();
        fs::write(dir.path().join(STYLESHEET_NAME), "p {}").unwrap();

        let resources = DirectoryResources::new(dir.path());
        assert_eq!(resources.template().unwrap(), "<p>%name%</p>");
        assert_eq!(resources.stylesheet().unwrap(), b"p {}");
    }

    #[test]
    fn test_directory_resources_missing_file() {
        let dir = tempdir().unwrap();
        let resources = DirectoryResources::new(dir.path());

        let err = resources.template().unwrap_err();
        assert!(matches!(err, WidgetError::Resource { ref name, .. } if name == TEMPLATE_NAME));
        assert!(resources.stylesheet().is_err());
    }

    #[test]
    fn test_directory_resources_invalid_utf8() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(TEMPLATE_NAME), [0xff, 0xfe, 0x00]).unwrap();

        let resources = DirectoryResources::new(dir.path());
        assert!(resources.template().is_err());
    }
}
