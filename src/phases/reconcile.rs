//! Phase 4: Manifest Reconciliation
//!
//! When a manifest is configured it is the authority on which scripts run and
//! in what order. Each loaded script is matched against the manifest lines by
//! exact string equality:
//!
//! - every matching line yields one copy of the script, tagged with that
//!   line's zero-based position;
//! - a script with no matching line is dropped and reported as a
//!   [`Warning::NotInManifest`].
//!
//! A path listed more than once in the manifest is therefore emitted more
//! than once. That is kept as is, but each such path is also reported with
//! [`Warning::DuplicateManifestEntry`] so the manifest author notices.
//!
//! Warnings are returned to the caller, which decides whether to print them.

use std::fmt;

use log::debug;

use crate::script::{Manifest, Script};

/// Non-fatal finding produced while reconciling against the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A changed file has no line in the manifest and was left out
    NotInManifest { name: String },
    /// A changed file appears on several manifest lines and is emitted once
    /// per line
    DuplicateManifestEntry { name: String, count: usize },
}

impl Warning {
    /// The script path the warning is about.
    pub fn name(&self) -> &str {
        match self {
            Warning::NotInManifest { name } => name,
            Warning::DuplicateManifestEntry { name, .. } => name,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NotInManifest { name } => {
                write!(f, "Changed file not found in manifest: {}", name)
            }
            Warning::DuplicateManifestEntry { name, count } => write!(
                f,
                "Changed file listed {} times in manifest, it will be emitted {} times: {}",
                count, count, name
            ),
        }
    }
}

/// Scripts kept by reconciliation plus the warnings raised on the way
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    pub scripts: Vec<Script>,
    pub warnings: Vec<Warning>,
}

/// Execute Phase 4: reconcile scripts against the manifest
///
/// Without a manifest every script passes through unchanged.
pub fn execute(scripts: Vec<Script>, manifest: Option<&Manifest>) -> Reconciled {
    let Some(manifest) = manifest else {
        return Reconciled {
            scripts,
            warnings: Vec::new(),
        };
    };

    let mut matched = Vec::with_capacity(scripts.len());
    let mut warnings = Vec::new();

    for script in scripts {
        let positions: Vec<usize> = manifest.positions(&script.name).collect();
        match positions.len() {
            0 => {
                debug!("{} is not in the manifest", script.name);
                warnings.push(Warning::NotInManifest {
                    name: script.name.clone(),
                });
            }
            count => {
                if count > 1 {
                    warnings.push(Warning::DuplicateManifestEntry {
                        name: script.name.clone(),
                        count,
                    });
                }
                for pos in positions {
                    matched.push(Script {
                        manifest_index: pos,
                        ..script.clone()
                    });
                }
            }
        }
    }

    Reconciled {
        scripts: matched,
        warnings,
    }
}
