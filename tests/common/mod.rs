//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a throwaway git repository fixture with
//! deterministic commit times, so that chronological ordering can be
//! asserted exactly.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let repo = GitRepo::new();
//!     let base = repo.commit_at("base", 1_000);
//!     repo.write("migrations/001.sql", "CREATE TABLE a ();");
//!     repo.commit_at("add a", 2_000);
//!     repo.command().arg(&base).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::GitRepo;
}

/// A temporary git repository on the `main` branch.
pub struct GitRepo {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl GitRepo {
    /// Create and configure an empty repository.
    pub fn new() -> Self {
        let repo = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        };
        repo.git(&["init", "-b", "main"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        // Disable commit signing for tests
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    /// Run git in the repository and return its trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        self.git_with_env(args, &[])
    }

    fn git_with_env(&self, args: &[&str], env: &[(&str, String)]) -> String {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(self.path());
        for (key, value) in env {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Write a file in the work tree, creating parent directories.
    pub fn write(&self, path: &str, content: &str) -> &Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Write raw bytes to a file in the work tree.
    pub fn write_bytes(&self, path: &str, content: &[u8]) -> &Self {
        self.temp_dir
            .child(path)
            .write_binary(content)
            .expect("Failed to write file");
        self
    }

    /// Delete a file from the work tree.
    pub fn remove(&self, path: &str) -> &Self {
        std::fs::remove_file(self.path().join(path)).expect("Failed to remove file");
        self
    }

    /// Stage everything and commit with the given author and committer time.
    ///
    /// Returns the new commit id.
    pub fn commit_at(&self, message: &str, timestamp: i64) -> String {
        // The `@` prefix makes git read small values as epoch seconds
        let date = format!("@{} +0000", timestamp);
        self.git(&["add", "-A"]);
        self.git_with_env(
            &["commit", "--allow-empty", "-q", "-m", message],
            &[
                ("GIT_AUTHOR_DATE", date.clone()),
                ("GIT_COMMITTER_DATE", date),
            ],
        );
        self.head()
    }

    /// Full id of the current HEAD commit.
    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    /// Path to the work tree.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the work tree.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a `tq` command running in this repository.
    ///
    /// Environment that would leak configuration in from the caller is
    /// cleared.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("tq");
        cmd.current_dir(self.path())
            .env_remove("TORQUILLA_CONFIG")
            .env_remove("TORQUILLA_DIR")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for GitRepo {
    fn default() -> Self {
        Self::new()
    }
}
