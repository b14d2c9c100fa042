//! Phase 3: Script Loading
//!
//! Fetches each changed file as of the end reference together with the time
//! of the last commit that touched it within the range.
//!
//! Loads are independent, so they run in parallel with rayon. Results are
//! collected back in input order and the first failure in that order is the
//! one reported, which keeps error output deterministic.
//!
//! A file that cannot be read at the end reference aborts the run. A missing
//! timestamp does not: the script gets timestamp `0` and sorts first under
//! chronological ordering.

use log::{debug, warn};
use rayon::prelude::*;

use super::RevisionRange;
use crate::error::Result;
use crate::repository::GitOperations;
use crate::script::Script;

/// Load a single script.
pub fn load(git: &dyn GitOperations, path: &str, range: &RevisionRange) -> Result<Script> {
    let data = git.file_content_at(&range.end, path)?;
    let timestamp = match git.last_commit_time_in_range(&range.start, &range.end, path)? {
        Some(ts) => ts,
        None => {
            warn!("no commit touching {} found in range, using timestamp 0", path);
            0
        }
    };

    debug!("loaded {} ({} bytes, timestamp {})", path, data.len(), timestamp);
    Ok(Script::new(path, timestamp, data))
}

/// Execute Phase 3: load every changed path
pub fn execute(
    git: &dyn GitOperations,
    paths: &[String],
    range: &RevisionRange,
) -> Result<Vec<Script>> {
    let results: Vec<Result<Script>> = paths
        .par_iter()
        .map(|path| load(git, path, range))
        .collect();

    results.into_iter().collect()
}
