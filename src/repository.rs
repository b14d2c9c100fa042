//! # Version-Control Query Interface
//!
//! The pipeline never talks to git directly. Every stage goes through the
//! [`GitOperations`] trait, which exposes exactly the five queries the
//! assembly needs:
//!
//! - resolving a revision expression to a commit id;
//! - resolving the current branch tip;
//! - listing the paths changed between two commits;
//! - reading a file as of a commit;
//! - finding the last commit time of a path within a range.
//!
//! [`DefaultGitOperations`] implements the trait with the system `git`
//! binary. Tests substitute the in-memory `MockGitOperations` so that the
//! phases can be exercised without creating repositories on disk.

use std::path::{Path, PathBuf};

use crate::config::DiffFilter;
use crate::error::Result;
use crate::git;

/// Trait for git queries - allows mocking in tests
///
/// Implementations must be shareable across threads because scripts are
/// loaded in parallel.
pub trait GitOperations: Send + Sync {
    /// Resolve a revision expression (branch, tag, short hash) to a commit id.
    fn disambiguate(&self, expression: &str) -> Result<String>;

    /// Resolve the current branch tip (HEAD) to a commit id.
    fn current_branch_tip(&self) -> Result<String>;

    /// List the paths whose status matches `filter` between two commits,
    /// restricted to `paths` when it is non-empty.
    fn diff(
        &self,
        start: &str,
        end: &str,
        filter: DiffFilter,
        paths: &[String],
    ) -> Result<Vec<String>>;

    /// Read the content of `path` as of `commit`.
    fn file_content_at(&self, commit: &str, path: &str) -> Result<Vec<u8>>;

    /// Commit time of the newest commit touching `path` within the inclusive
    /// range `start..=end`, or `None` if there is none.
    fn last_commit_time_in_range(&self, start: &str, end: &str, path: &str)
        -> Result<Option<i64>>;
}

/// The default implementation of `GitOperations`, which runs the system
/// `git` command inside the repository directory.
#[derive(Debug, Clone)]
pub struct DefaultGitOperations {
    dir: PathBuf,
}

impl DefaultGitOperations {
    /// Open the repository containing `dir`.
    ///
    /// Fails with [`Error::RepositoryOpen`](crate::error::Error::RepositoryOpen)
    /// when `dir` is not inside a git work tree.
    pub fn open(dir: &Path) -> Result<Self> {
        git::open_repository(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }
}

impl GitOperations for DefaultGitOperations {
    fn disambiguate(&self, expression: &str) -> Result<String> {
        git::rev_parse(&self.dir, expression)
    }

    fn current_branch_tip(&self) -> Result<String> {
        git::rev_parse(&self.dir, "HEAD")
    }

    fn diff(
        &self,
        start: &str,
        end: &str,
        filter: DiffFilter,
        paths: &[String],
    ) -> Result<Vec<String>> {
        git::diff_names(&self.dir, start, end, filter, paths)
    }

    fn file_content_at(&self, commit: &str, path: &str) -> Result<Vec<u8>> {
        git::cat_blob(&self.dir, commit, path)
    }

    fn last_commit_time_in_range(
        &self,
        start: &str,
        end: &str,
        path: &str,
    ) -> Result<Option<i64>> {
        git::last_commit_time(&self.dir, start, end, path)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_git_operations_open_non_repository() {
        let temp = TempDir::new().unwrap();
        let result = DefaultGitOperations::open(temp.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to open repository"));
    }

    #[test]
    fn test_mock_diff_respects_path_prefixes() {
        use mock::MockGitOperations;

        let git = MockGitOperations::new()
            .with_change(DiffFilter::Added, "migrations/001.sql")
            .with_change(DiffFilter::Added, "docs/readme.md");
        let paths = vec!["migrations".to_string()];
        let changed = git.diff("a", "b", DiffFilter::Added, &paths).unwrap();
        assert_eq!(changed, vec!["migrations/001.sql".to_string()]);
    }
}
