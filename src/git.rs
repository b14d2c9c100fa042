//! Thin wrappers around the system `git` binary.
//!
//! Every query the pipeline needs is one `git -C <dir> ...` invocation. Using
//! the system binary means the repository's own configuration (alternates,
//! worktrees, safe.directory) is honoured without extra work.

use std::path::Path;
use std::process::Command;

use log::trace;

use crate::config::DiffFilter;
use crate::error::{Error, Result};

/// Captured result of a finished git invocation
pub struct GitOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

fn display_command(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

/// Run git in `dir` and capture its output without judging the exit status.
pub fn run(dir: &Path, args: &[&str]) -> Result<GitOutput> {
    trace!("running {} in {}", display_command(args), dir.display());

    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .map_err(|e| Error::GitCommand {
            command: display_command(args),
            dir: dir.to_path_buf(),
            stderr: e.to_string(),
        })?;

    Ok(GitOutput {
        success: output.status.success(),
        stdout: output.stdout,
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

/// Run git in `dir`, turning a non-zero exit into [`Error::GitCommand`].
pub fn run_checked(dir: &Path, args: &[&str]) -> Result<Vec<u8>> {
    let output = run(dir, args)?;
    if !output.success {
        return Err(Error::GitCommand {
            command: display_command(args),
            dir: dir.to_path_buf(),
            stderr: output.stderr,
        });
    }
    Ok(output.stdout)
}

/// Check that `dir` is inside a git work tree.
pub fn open_repository(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(Error::RepositoryOpen {
            dir: dir.to_path_buf(),
            message: "directory does not exist".to_string(),
        });
    }

    let output = run(dir, &["rev-parse", "--is-inside-work-tree"])?;
    if !output.success || String::from_utf8_lossy(&output.stdout).trim() != "true" {
        let message = if output.stderr.is_empty() {
            "not a git work tree".to_string()
        } else {
            output.stderr
        };
        return Err(Error::RepositoryOpen {
            dir: dir.to_path_buf(),
            message,
        });
    }
    Ok(())
}

/// Resolve a revision expression to a full commit id.
///
/// Unknown and ambiguous expressions both fail with [`Error::RefNotFound`].
pub fn rev_parse(dir: &Path, expression: &str) -> Result<String> {
    let spec = format!("{}^{{commit}}", expression);
    let output = run(dir, &["rev-parse", "--verify", "--quiet", &spec])?;
    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.success || sha.is_empty() {
        return Err(Error::RefNotFound {
            expression: expression.to_string(),
        });
    }
    Ok(sha)
}

/// List paths changed between two commits, in git's output order.
pub fn diff_names(
    dir: &Path,
    start: &str,
    end: &str,
    filter: DiffFilter,
    paths: &[String],
) -> Result<Vec<String>> {
    let diff_filter = format!("--diff-filter={}", filter.as_git_arg());
    let mut args = vec![
        "diff",
        "--name-only",
        "--no-renames",
        "-z",
        diff_filter.as_str(),
        start,
        end,
    ];
    if !paths.is_empty() {
        args.push("--");
        args.extend(paths.iter().map(|p| p.as_str()));
    }

    let stdout = run_checked(dir, &args)?;
    Ok(split_nul(&stdout))
}

/// Read the blob at `path` in the tree of `commit`.
pub fn cat_blob(dir: &Path, commit: &str, path: &str) -> Result<Vec<u8>> {
    let object = format!("{}:{}", commit, path);
    let output = run(dir, &["cat-file", "blob", &object])?;
    if !output.success {
        return Err(Error::Load {
            path: path.to_string(),
            r#ref: commit.to_string(),
            message: if output.stderr.is_empty() {
                "path does not exist in tree".to_string()
            } else {
                output.stderr
            },
        });
    }
    Ok(output.stdout)
}

/// Commit time of the newest commit touching `path` from `start` to `end`.
///
/// The range includes `start` itself. Returns `Ok(None)` when no commit in
/// the range touches the path.
pub fn last_commit_time(dir: &Path, start: &str, end: &str, path: &str) -> Result<Option<i64>> {
    let exclude = format!("{}^@", start);
    let args = [
        "log",
        "-1",
        "--format=%ct",
        end,
        "--not",
        exclude.as_str(),
        "--",
        path,
    ];
    let stdout = run_checked(dir, &args)?;
    let text = String::from_utf8_lossy(&stdout);
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<i64>().map(Some).map_err(|e| Error::Load {
        path: path.to_string(),
        r#ref: end.to_string(),
        message: format!("could not interpret timestamp \"{}\": {}", text, e),
    })
}

fn split_nul(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|b| *b == 0)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}
