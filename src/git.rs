//! Capability wrapper over the `git` binary.
//!
//! The pipeline needs a handful of version-control capabilities: clean
//! check, tracked-file restore, per-path change detection, stage, commit,
//! and push. Each is a thin method over a `git` subprocess rather than a
//! reimplementation; stdout is captured, stderr becomes the error detail.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// A handle to a working tree.
pub struct GitRepo {
    dir: PathBuf,
}

impl GitRepo {
    /// Open a repository at a known working tree directory.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Discover the repository containing the current directory.
    ///
    /// # Errors
    ///
    /// Returns `Error::Git` if the current directory is not inside a
    /// git working tree.
    pub fn discover() -> Result<Self> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .map_err(|e| Error::Git {
                op: "rev-parse".to_string(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Git {
                op: "rev-parse".to_string(),
                detail: "not inside a git working tree".to_string(),
            });
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self::open(root))
    }

    /// The working tree directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn run(&self, op: &str, args: &[&str]) -> Result<String> {
        tracing::debug!(op, ?args, "running git");
        let output = Command::new("git")
            .current_dir(&self.dir)
            .args(args)
            .output()
            .map_err(|e| Error::Git {
                op: op.to_string(),
                detail: format!("failed to spawn git: {e}"),
            })?;

        if !output.status.success() {
            return Err(Error::Git {
                op: op.to_string(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Tracked files with uncommitted modifications, staged or not.
    /// Untracked files are not reported; they are never our business.
    ///
    /// # Errors
    ///
    /// Returns `Error::Git` if the status query fails.
    pub fn dirty_tracked_files(&self) -> Result<Vec<String>> {
        let out = self.run("status", &["status", "--porcelain"])?;
        Ok(out
            .lines()
            .filter(|line| !line.starts_with("??"))
            .filter_map(|line| line.get(3..))
            // Rename lines read "old -> new"; the new path is the one
            // that exists in the working tree.
            .map(|path| {
                path.rsplit_once(" -> ")
                    .map_or(path, |(_, new)| new)
                    .to_string()
            })
            .collect())
    }

    /// Restore all tracked files to their HEAD state. Untracked files are
    /// left alone.
    ///
    /// # Errors
    ///
    /// Returns `Error::Git` if the restore fails.
    pub fn restore_tracked(&self) -> Result<()> {
        self.run("checkout", &["checkout", "--", "."]).map(|_| ())
    }

    /// Whether `path` differs from the last commit. A never-committed file
    /// at `path` counts as changed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Git` if the status query fails.
    pub fn path_changed(&self, path: &str) -> Result<bool> {
        let out = self.run("status", &["status", "--porcelain", "--", path])?;
        Ok(!out.trim().is_empty())
    }

    /// Stage a single path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Git` if staging fails.
    pub fn stage(&self, path: &str) -> Result<()> {
        self.run("add", &["add", "--", path]).map(|_| ())
    }

    /// Create a commit with the given message.
    ///
    /// # Errors
    ///
    /// Returns `Error::Git` if the commit fails.
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run("commit", &["commit", "-m", message]).map(|_| ())
    }

    /// Push a branch to a remote. No retry, no rebase: a rejected push is
    /// the caller's problem to reconcile.
    ///
    /// # Errors
    ///
    /// Returns `Error::Git` if the push fails.
    pub fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run("push", &["push", remote, branch]).map(|_| ())
    }
}
