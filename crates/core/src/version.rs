//! Version identifiers for plugin releases and platform versions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WidgetError};

/// A parsed version such as `2.0`, `1.10.1` or `3.0-RC2`.
///
/// The original string is kept verbatim in [`Version::name`]; ordering uses the
/// numeric segments first, then the qualifier. A release without a qualifier
/// sorts after any qualified release with the same numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    name: String,
    numbers: Vec<u64>,
    qualifier: Option<String>,
}

impl Version {
    /// Parses a version identifier.
    pub fn parse(input: &str) -> Result<Self> {
        let name = input.trim();
        if name.is_empty() {
            return Err(WidgetError::InvalidVersion(input.to_string()));
        }

        let (numeric, qualifier) = match name.find(['-', '_']) {
            Some(idx) => (&name[..idx], Some(name[idx + 1..].to_string())),
            None => (name, None),
        };

        let numbers = numeric
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| WidgetError::InvalidVersion(input.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            numbers,
            qualifier: qualifier.filter(|q| !q.is_empty()),
        })
    }

    /// Returns the version string as written in the metadata.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the qualifier (the part after `-`), if any.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    fn number(&self, idx: usize) -> u64 {
        self.numbers.get(idx).copied().unwrap_or(0)
    }
}

impl FromStr for Version {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = WidgetError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.name
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.numbers.len().max(other.numbers.len());
        for idx in 0..len {
            match self.number(idx).cmp(&other.number(idx)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        match (&self.qualifier, &other.qualifier) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}
