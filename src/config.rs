//! # Configuration Schema and Parsing
//!
//! This module defines the [`Config`] struct that every pipeline stage reads
//! its settings from, together with the parsing of the optional
//! `torquilla.yaml` / `torquilla.toml` configuration file.
//!
//! ## Key Components
//!
//! - **`Config`**: All recognised options (`dir`, `manifest`, `silent`,
//!   `name-only`, `migrations`, `definitions`, `extensions`, `version_tmpl`,
//!   `template`). Built once at process entry and passed by reference.
//!
//! - **`DiffFilter`** and **`Category`**: The two detection categories.
//!   "migrations" only picks up added files, "definitions" picks up added or
//!   modified files.
//!
//! - **`ChangeSet`**: One detection request, consumed by
//!   [`phases::detect`](crate::phases::detect).
//!
//! ## Parsing
//!
//! [`parse`] reads YAML, [`parse_toml`] reads TOML and [`from_file`] picks
//! one by file extension. Unknown keys are rejected so that a typo such as
//! `migration:` does not silently disable a category.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Status restriction applied to a diff between two references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffFilter {
    /// Only files added in the range
    Added,
    /// Files added or modified in the range
    AddedOrModified,
}

impl DiffFilter {
    /// The value passed to `git diff --diff-filter=`.
    pub fn as_git_arg(&self) -> &'static str {
        match self {
            DiffFilter::Added => "A",
            DiffFilter::AddedOrModified => "AM",
        }
    }
}

/// A named set of path restrictions sharing one diff filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub filter: DiffFilter,
    pub paths: Vec<String>,
}

/// One change detection request
///
/// Immutable once built; consumed by the change detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    pub start: String,
    pub end: String,
    pub filter: DiffFilter,
    pub paths: Vec<String>,
    pub extensions: Vec<String>,
}

/// Run configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Repository root. `None` means the process working directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Path to the ordering manifest.
    #[serde(default)]
    pub manifest: Option<PathBuf>,
    /// Suppress manifest warnings.
    #[serde(default)]
    pub silent: bool,
    /// Emit script names instead of the assembled body.
    #[serde(default, rename = "name-only", alias = "name_only")]
    pub name_only: bool,
    /// Path prefixes scanned for added files.
    #[serde(default)]
    pub migrations: Vec<String>,
    /// Path prefixes scanned for added or modified files.
    #[serde(default)]
    pub definitions: Vec<String>,
    /// File extensions (including the dot) allowed in both categories.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Printf-style format with one `%s` for the end reference.
    #[serde(default)]
    pub version_tmpl: Option<String>,
    /// Output template receiving `.Script` and `.Sha`.
    #[serde(default)]
    pub template: Option<String>,
}

impl Config {
    /// The configured detection categories, in declaration order.
    ///
    /// Categories without paths are left out entirely.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        if !self.migrations.is_empty() {
            categories.push(Category {
                name: "migrations",
                filter: DiffFilter::Added,
                paths: self.migrations.clone(),
            });
        }
        if !self.definitions.is_empty() {
            categories.push(Category {
                name: "definitions",
                filter: DiffFilter::AddedOrModified,
                paths: self.definitions.clone(),
            });
        }
        categories
    }

    /// The repository directory, falling back to the working directory.
    pub fn repository_dir(&self) -> Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}

fn unknown_field_hint(message: &str) -> Option<String> {
    if message.contains("unknown field") {
        Some(
            "Valid keys are: dir, manifest, silent, name-only, migrations, definitions, \
             extensions, version_tmpl, template"
                .to_string(),
        )
    } else {
        None
    }
}

/// Parse a YAML configuration document.
///
/// An empty document yields the default configuration.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if yaml_content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(yaml_content).map_err(|e| {
        let message = e.to_string();
        Error::ConfigParse {
            hint: unknown_field_hint(&message),
            message,
        }
    })
}

/// Parse a TOML configuration document.
pub fn parse_toml(toml_content: &str) -> Result<Config> {
    toml::from_str(toml_content).map_err(|e| {
        let message = e.to_string();
        Error::ConfigParse {
            hint: unknown_field_hint(&message),
            message,
        }
    })
}

/// Load a configuration file, choosing the format from its extension.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => parse_toml(&content),
        _ => parse(&content),
    }
}

/// Find the first default configuration file present in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    crate::defaults::CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}
