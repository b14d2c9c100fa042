//! Phase 1: Reference Resolution
//!
//! Turns the positional revision expressions into a [`RevisionRange`] of
//! concrete commit ids.
//!
//! - one expression: it is the start, and the end is the current branch tip;
//! - two expressions: start and end, resolved independently. No ordering
//!   between them is enforced. A start that comes after the end simply
//!   produces an empty change set later on.
//!
//! The argument count is validated before any repository query runs, so
//! [`check_arity`] is also exposed for callers that want to fail before
//! opening the repository at all.

use log::debug;

use super::RevisionRange;
use crate::error::{Error, Result};
use crate::repository::GitOperations;

/// Reject argument lists that are not one or two expressions long.
pub fn check_arity(expressions: &[String]) -> Result<()> {
    match expressions.len() {
        0 => Err(Error::Usage {
            message: "commit range required".to_string(),
            hint: Some("Usage: tq <start> [end]".to_string()),
        }),
        1 | 2 => Ok(()),
        _ => Err(Error::Usage {
            message: "too many arguments".to_string(),
            hint: Some("Pass at most two revisions: tq <start> [end]".to_string()),
        }),
    }
}

/// Execute Phase 1: resolve the commit range
pub fn execute(git: &dyn GitOperations, expressions: &[String]) -> Result<RevisionRange> {
    check_arity(expressions)?;

    let start = git.disambiguate(&expressions[0])?;
    let end = match expressions.get(1) {
        Some(expression) => git.disambiguate(expression)?,
        None => git.current_branch_tip()?,
    };

    debug!("resolved range {}..{}", start, end);
    Ok(RevisionRange { start, end })
}
