//! Sync command implementation.
//!
//! Reads credentials from the environment, discovers the repository from
//! the current directory, and runs the pipeline once. Exit status 0 covers
//! both the committed and the no-op case.

use colored::Colorize;

use crate::config::{DATASET_FILE, SyncConfig};
use crate::error::Result;
use crate::fetch::FeltExportSource;
use crate::git::GitRepo;
use crate::sync::{self, SyncOptions, SyncOutcome};

/// Execute the sync command.
///
/// # Errors
///
/// Propagates any pipeline stage failure; see [`sync::run`].
pub fn execute(dry_run: bool, force_clean: bool, json: bool) -> Result<()> {
    // Config first: missing credentials must abort before any network
    // call or working-tree inspection.
    let config = SyncConfig::from_env()?;
    let repo = GitRepo::discover()?;
    let source = FeltExportSource::new(config);

    let outcome = sync::run(&repo, DATASET_FILE, &source, SyncOptions { dry_run, force_clean })?;

    if json {
        let payload = match outcome {
            SyncOutcome::NoOp => serde_json::json!({"outcome": "noop"}),
            SyncOutcome::Committed => serde_json::json!({"outcome": "committed"}),
            SyncOutcome::DryRun { would_commit } => {
                serde_json::json!({"outcome": "dry_run", "would_commit": would_commit})
            }
        };
        println!("{}", serde_json::to_string(&payload)?);
        return Ok(());
    }

    match outcome {
        SyncOutcome::NoOp => {
            println!("{} Export unchanged; nothing to commit.", "✓".green());
        }
        SyncOutcome::Committed => {
            println!(
                "{} {} updated, committed, and pushed to {}/{}.",
                "✓".green(),
                DATASET_FILE.bold(),
                sync::REMOTE,
                sync::BRANCH
            );
        }
        SyncOutcome::DryRun { would_commit: true } => {
            println!("Dry run: the export differs; a real run would commit and push.");
        }
        SyncOutcome::DryRun { would_commit: false } => {
            println!("Dry run: the export matches the local dataset; a real run would be a no-op.");
        }
    }

    Ok(())
}
