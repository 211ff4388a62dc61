//! The fetch -> validate -> replace -> commit pipeline.
//!
//! One run walks a fixed sequence of stages:
//!
//! 1. **Clean check** - refuse to start on a working tree with uncommitted
//!    modifications to tracked files (or restore them with `force_clean`).
//! 2. **Fetch + validate** - pull the export through an [`ExportSource`];
//!    a body failing the shape check aborts the run with the dataset
//!    untouched.
//! 3. **Replace** - atomically overwrite the dataset with the raw body.
//! 4. **Diff check** - if git sees no change to the dataset path, the run
//!    is a no-op. This is what makes back-to-back runs idempotent.
//! 5. **Commit + push** - stage, commit with the fixed message, push to
//!    the main line. A rejected push is fatal; the local commit is left
//!    for a human to reconcile.
//!
//! Strictly sequential and all-or-nothing: the first failing stage ends
//! the run. Nothing here takes a lock, so overlapping runs must be
//! prevented by the scheduler invoking the tool.

mod file;

pub use file::atomic_write;

use std::fs;

use crate::config::COMMIT_MESSAGE;
use crate::error::{Error, Result};
use crate::fetch::ExportSource;
use crate::git::GitRepo;

/// Remote the sync commit is pushed to.
pub const REMOTE: &str = "origin";

/// Branch the sync commit is pushed to.
pub const BRANCH: &str = "main";

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The export matched the committed dataset; nothing to do.
    NoOp,
    /// Dataset replaced, committed, and pushed.
    Committed,
    /// Dry run stopped before touching anything; reports whether a real
    /// run would have created a commit.
    DryRun { would_commit: bool },
}

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Stop before writing, committing, or pushing; report what a real
    /// run would do.
    pub dry_run: bool,
    /// On a dirty working tree, restore tracked files to HEAD instead of
    /// failing. Untracked files are never touched either way.
    pub force_clean: bool,
}

/// Run the sync pipeline once.
///
/// `dataset` is the dataset path relative to the repository root.
///
/// # Errors
///
/// Any stage failure aborts the run: `DirtyWorkingTree`, `Network`,
/// `Validation`, `Io`, or `Git`. After a `Validation` or `Network` error
/// the dataset file is guaranteed untouched; after a `Git` push failure
/// the local commit already exists and local/remote state diverge until
/// reconciled manually.
pub fn run(
    repo: &GitRepo,
    dataset: &str,
    source: &dyn ExportSource,
    opts: SyncOptions,
) -> Result<SyncOutcome> {
    ensure_clean(repo, opts.force_clean)?;

    let export = source.fetch()?;
    tracing::info!(features = export.collection.features.len(), "export accepted");

    let target = repo.dir().join(dataset);

    if opts.dry_run {
        // Compare against the file instead of writing it, so a dry run
        // leaves no trace at all.
        let would_commit = match fs::read_to_string(&target) {
            Ok(current) => current != export.raw,
            Err(_) => true,
        };
        tracing::info!(would_commit, "dry run; stopping before replace");
        return Ok(SyncOutcome::DryRun { would_commit });
    }

    atomic_write(&target, &export.raw)?;
    tracing::info!(path = %target.display(), "dataset replaced");

    if !repo.path_changed(dataset)? {
        tracing::info!("dataset unchanged; nothing to commit");
        return Ok(SyncOutcome::NoOp);
    }

    repo.stage(dataset)?;
    repo.commit(COMMIT_MESSAGE)?;
    repo.push(REMOTE, BRANCH)?;
    tracing::info!("pushed {} to {}", BRANCH, REMOTE);

    Ok(SyncOutcome::Committed)
}

/// Guarantee the run starts from a known-clean working tree.
///
/// Tracked-file modifications left by a previous failed run (or a human)
/// would otherwise end up inside the sync commit. Without `force`, they
/// are reported and the run refuses to start; with `force`, they are
/// restored to HEAD.
fn ensure_clean(repo: &GitRepo, force: bool) -> Result<()> {
    let dirty = repo.dirty_tracked_files()?;
    if dirty.is_empty() {
        return Ok(());
    }

    if force {
        tracing::warn!(files = dirty.len(), "restoring tracked files to HEAD");
        return repo.restore_tracked();
    }

    Err(Error::DirtyWorkingTree { files: dirty })
}
