//! Error types for infowidget.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for infowidget operations.
pub type Result<T> = std::result::Result<T, WidgetError>;

/// Main error type for infowidget.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Plugin '{plugin}' has no release to render")]
    MissingRelease { plugin: String },

    #[error("Plugin key '{0}' cannot be used as a file name")]
    InvalidKey(String),

    #[error("Output directory not found: {0}")]
    OutputDirNotFound(PathBuf),

    #[error("Failed to load resource '{name}': {source}")]
    Resource {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {message}")]
    Parse { message: String, span: Option<Span> },

    #[error("Missing property '{0}'")]
    MissingProperty(String),

    #[error("Invalid version '{0}'")]
    InvalidVersion(String),

    #[error("Invalid date '{value}': {message}")]
    InvalidDate { value: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source span for error reporting.
#[derive(Debug, Clone)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}
