//! # Error Handling
//!
//! This module defines the centralized error type for `torquilla`. It uses
//! the `thiserror` library to create an `Error` enum covering every fatal
//! failure the assembly pipeline can hit, each with enough context to tell the
//! operator what went wrong.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Variants map onto the pipeline stages:
//!   argument validation, reference resolution, git queries, script loading,
//!   manifest reading, configuration parsing and template rendering.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Every variant here is fatal. Non-fatal conditions such as a changed file
//! missing from the manifest are reported as
//! [`Warning`](crate::phases::reconcile::Warning) values instead.

use std::path::PathBuf;

use thiserror::Error;

fn render_hint(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n  hint: {}", h))
        .unwrap_or_default()
}

/// Main error type for torquilla operations
#[derive(Error, Debug)]
pub enum Error {
    /// The positional commit range was missing or had too many elements.
    #[error("{message}{}", render_hint(hint))]
    Usage {
        message: String,
        /// Optional hint for how to call the command correctly
        hint: Option<String>,
    },

    /// A revision expression did not resolve to exactly one commit.
    #[error("Could not find revision \"{expression}\" in repository")]
    RefNotFound { expression: String },

    /// The configured directory is not inside a git work tree.
    #[error("Failed to open repository at \"{}\": {message}", dir.display())]
    RepositoryOpen { dir: PathBuf, message: String },

    /// An error occurred while executing a Git command.
    #[error("Git command failed in {}: {command} - {stderr}", dir.display())]
    GitCommand {
        command: String,
        dir: PathBuf,
        stderr: String,
    },

    /// A changed file could not be loaded as of the end reference.
    #[error("Could not load \"{path}\" at {r#ref}: {message}")]
    Load {
        path: String,
        r#ref: String,
        message: String,
    },

    /// The ordering manifest could not be read.
    #[error("Could not read manifest file \"{}\": {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// An error occurred while parsing the configuration file.
    #[error("Configuration parsing error: {message}{}", render_hint(hint))]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The output template failed to parse or to execute.
    ///
    /// May include the name of the problematic field when applicable.
    #[error("Template processing error: {message}{}", variable.as_ref().map(|v| format!(" (variable: {})", v)).unwrap_or_default())]
    Template {
        message: String,
        /// The template field that caused the error, if applicable
        variable: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
