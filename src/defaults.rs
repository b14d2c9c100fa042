//! Default values for torquilla configuration.
//!
//! This module provides centralized default values used by the CLI and the
//! configuration loader.

/// Configuration file names looked up in the working directory, in order.
pub const CONFIG_FILENAMES: &[&str] = &["torquilla.yaml", "torquilla.yml", "torquilla.toml"];

/// Header of the synthetic entry appended when a version template is set.
pub const VERSION_ENTRY_HEADER: &str = "-- update version number";

/// Separator between assembled entries, and between a header and its body.
pub const ENTRY_SEPARATOR: &str = "\n\n";

/// Default log level when neither `--log-level` nor `RUST_LOG` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
