//! Infowidget Parser - Update-center metadata parser using nom combinators.

mod ast;
mod combinators;
mod error;
mod lexer;
mod parser;

pub use ast::Property;
pub use error::ParseError;
pub use parser::{build_update_center, parse_properties, parse_update_center};

use std::path::Path;

use infowidget_core::{Result, UpdateCenter};

/// Parses an update-center catalog from the given path.
pub fn parse_file(path: &Path) -> Result<UpdateCenter> {
    let content =
        std::fs::read_to_string(path).map_err(|e| infowidget_core::WidgetError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    parse_update_center(&content, path)
}

/// Parses an update-center catalog from a string.
pub fn parse_str(content: &str) -> Result<UpdateCenter> {
    parse_update_center(content, Path::new("<string>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("update-center.properties");
        fs::write(&path, "plugins=pmd\npmd.name=PMD\n").unwrap();

        let center = parse_file(&path).unwrap();
        assert_eq!(center.path, path);
        assert_eq!(center.get_plugin("pmd").unwrap().name, "PMD");
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = tempdir().unwrap();
        let err = parse_file(&dir.path().join("missing.properties")).unwrap_err();
        assert!(matches!(err, infowidget_core::WidgetError::FileRead { .. }));
    }

    #[test]
    fn test_parse_str() {
        let center = parse_str("plugins=\n").unwrap();
        assert!(center.is_empty());
    }
}
