//! Phase 5: Determining Script Order
//!
//! Produces the deterministic run order of the reconciled scripts. Exactly
//! one [`SortStrategy`] is active per run:
//!
//! - **Chronological**: by last commit time, oldest first. Used when no
//!   manifest is configured.
//! - **ManifestOrder**: by manifest line position. Used whenever a manifest
//!   is configured; timestamps are then ignored entirely.
//!
//! Both sorts are stable. Files touched by one commit share a timestamp, and
//! the stable sort keeps them in the order change detection found them.

use std::cmp::Ordering;

use log::debug;

use crate::script::Script;

/// Which comparator orders the scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    Chronological,
    ManifestOrder,
}

impl SortStrategy {
    /// Manifest order wins whenever a manifest is configured.
    pub fn select(has_manifest: bool) -> Self {
        if has_manifest {
            SortStrategy::ManifestOrder
        } else {
            SortStrategy::Chronological
        }
    }

    /// The comparator implementing this strategy.
    pub fn comparator(self) -> fn(&Script, &Script) -> Ordering {
        match self {
            SortStrategy::Chronological => by_timestamp,
            SortStrategy::ManifestOrder => by_manifest_index,
        }
    }
}

/// Compare by last commit time, ascending.
pub fn by_timestamp(a: &Script, b: &Script) -> Ordering {
    a.timestamp.cmp(&b.timestamp)
}

/// Compare by manifest position, ascending.
pub fn by_manifest_index(a: &Script, b: &Script) -> Ordering {
    a.manifest_index.cmp(&b.manifest_index)
}

/// Execute Phase 5: sort scripts in place with the given strategy
pub fn execute(scripts: &mut [Script], strategy: SortStrategy) {
    debug!("ordering {} script(s) with {:?}", scripts.len(), strategy);
    scripts.sort_by(strategy.comparator());
}
