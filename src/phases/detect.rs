//! Phase 2: Change Detection
//!
//! Lists the files that changed in the commit range. Detection runs once per
//! configured [`Category`]: "migrations" only picks up added files and
//! "definitions" picks up added or modified files. Results are concatenated
//! in category order.
//!
//! ## Filtering
//!
//! 1.  **Status and paths**: handled by git itself through the diff filter and
//!     pathspecs.
//! 2.  **Extensions**: a post-filter keeping paths whose extension, dot
//!     included, equals one of the configured extensions exactly.
//!     Comparison is case-sensitive.
//!
//! A path can satisfy both categories (for example a definition added in the
//! range under a directory listed in both). Such a path is kept once, at its
//! first position, so it is never loaded or assembled twice.

use std::collections::HashSet;

use log::debug;

use super::RevisionRange;
use crate::config::{Category, ChangeSet};
use crate::error::Result;
use crate::repository::GitOperations;

/// The extension of `path` including the leading dot, or `""` if none.
///
/// Only the final path component is considered, so `dir.v2/file` has no
/// extension.
pub fn extension_of(path: &str) -> &str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(idx) => &file_name[idx..],
        None => "",
    }
}

/// Whether `path` passes the extension allow-list.
///
/// An empty allow-list accepts everything.
pub fn matches_extension(path: &str, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let ext = extension_of(path);
    !ext.is_empty() && extensions.iter().any(|allowed| allowed == ext)
}

/// Run one detection request.
pub fn detect(git: &dyn GitOperations, change_set: &ChangeSet) -> Result<Vec<String>> {
    let changed = git.diff(
        &change_set.start,
        &change_set.end,
        change_set.filter,
        &change_set.paths,
    )?;

    Ok(changed
        .into_iter()
        .filter(|path| !path.is_empty())
        .filter(|path| matches_extension(path, &change_set.extensions))
        .collect())
}

/// Execute Phase 2: detect changes for every category, in order
pub fn execute(
    git: &dyn GitOperations,
    range: &RevisionRange,
    categories: &[Category],
    extensions: &[String],
) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut changed = Vec::new();

    for category in categories {
        let change_set = ChangeSet {
            start: range.start.clone(),
            end: range.end.clone(),
            filter: category.filter,
            paths: category.paths.clone(),
            extensions: extensions.to_vec(),
        };
        let found = detect(git, &change_set)?;
        debug!("{}: {} changed file(s)", category.name, found.len());

        for path in found {
            if seen.insert(path.clone()) {
                changed.push(path);
            } else {
                debug!("{}: skipping {} (already detected)", category.name, path);
            }
        }
    }

    Ok(changed)
}
