//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Tooling for the community bike parking map
#[derive(Parser, Debug)]
#[command(name = "bikeparking", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge the base layer and a partial layer into one collection
    Merge {
        /// Base feature collection (its features come first)
        base: PathBuf,

        /// Partial feature collection, appended after the base
        partial: PathBuf,

        /// Output path (default: the authoritative dataset file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch the hosted map export and commit it if it changed
    Sync {
        /// Report what would happen without writing, committing, or pushing
        #[arg(long)]
        dry_run: bool,

        /// Restore tracked files to HEAD instead of failing on a dirty tree
        #[arg(long)]
        force_clean: bool,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
