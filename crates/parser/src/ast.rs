//! Syntax tree for properties files.

/// A single `key=value` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property key.
    pub key: String,

    /// Unescaped value, continuation lines joined.
    pub value: String,

    /// 1-based line where the entry starts.
    pub line: u32,
}

/// Root node: entries in file order.
#[derive(Debug, Clone, Default)]
pub struct AstProperties {
    pub entries: Vec<Property>,
}
