//! Scripts and the ordering manifest.

use std::path::Path;

use crate::error::{Error, Result};

/// One migration or definition file selected for assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Repository-relative path
    pub name: String,
    /// Seconds since epoch of the last commit touching the path in the range,
    /// `0` when unknown
    pub timestamp: i64,
    /// Zero-based manifest line this script matched; `0` without a manifest
    pub manifest_index: usize,
    /// Raw content as of the end reference, not necessarily UTF-8
    pub data: Vec<u8>,
}

impl Script {
    pub fn new(name: impl Into<String>, timestamp: i64, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            timestamp,
            manifest_index: 0,
            data,
        }
    }
}

/// Operator-authored run order: one repository path per line
///
/// Lines are kept verbatim. Blank lines and lines starting with `#` are
/// ordinary entries; they simply never match a changed path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    lines: Vec<String>,
}

impl Manifest {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split manifest text into lines, accepting `\n` and `\r\n` endings.
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Read a manifest file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::parse(&content))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Zero-based positions of every line equal to `name`.
    pub fn positions<'a>(&'a self, name: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.lines
            .iter()
            .enumerate()
            .filter(move |(_, line)| line.as_str() == name)
            .map(|(pos, _)| pos)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
