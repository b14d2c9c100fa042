//! Implementation of the 6 phases of the assembly pipeline.
//!
//! ## Overview
//!
//! 1. Reference Resolution - Turn revision expressions into commit ids
//! 2. Change Detection - List changed files per configured category
//! 3. Script Loading - Fetch content and last commit time of each file
//! 4. Manifest Reconciliation - Map scripts onto manifest lines (optional)
//! 5. Ordering - Sort by timestamp or by manifest position
//! 6. Rendering - Concatenate, append the version entry, apply the template
//!
//! Each phase depends only on the previous phases and the foundation layers
//! (`config`, `repository`, `script`). [`orchestrator`] runs them in order.

pub mod detect;
pub mod load;
pub mod orchestrator;
pub mod ordering;
pub mod reconcile;
pub mod render;
pub mod resolve;

// Numbered aliases matching the pipeline overview
pub use detect as phase2;
pub use load as phase3;
pub use ordering as phase5;
pub use reconcile as phase4;
pub use render as phase6;
pub use resolve as phase1;

/// A resolved commit range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    /// Commit id the range starts at (inclusive)
    pub start: String,
    /// Commit id the range ends at (inclusive)
    pub end: String,
}

impl RevisionRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}
