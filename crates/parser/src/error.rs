//! Parser error types.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Error type for properties syntax failures.
#[derive(Debug, Error, Diagnostic)]
#[error("Parse error at line {line}, column {column}: {message}")]
#[diagnostic(code(infowidget::parser::error))]
pub struct ParseError {
    pub message: String,
    pub line: u32,
    pub column: usize,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: Option<SourceSpan>,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        src: &str,
        offset: usize,
        line: u32,
        column: usize,
    ) -> Self {
        let offset = offset.min(src.len());
        let width = src[offset..].chars().next().map_or(0, char::len_utf8);
        Self {
            message: message.into(),
            line,
            column,
            src: src.to_string(),
            span: Some(SourceSpan::from(offset..offset + width)),
        }
    }
}

impl From<ParseError> for infowidget_core::WidgetError {
    fn from(err: ParseError) -> Self {
        let offset = err.span.map(|s| s.offset()).unwrap_or_default();
        infowidget_core::WidgetError::Parse {
            message: format!("{} (line {}, column {})", err.message, err.line, err.column),
            span: Some(infowidget_core::Span {
                start: offset,
                end: offset + 1,
                line: err.line as usize,
                column: err.column,
            }),
        }
    }
}
