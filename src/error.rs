//! Error types for the bikeparking CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=config, 3=parse, 4=validation, ...)
//! - Retryability flags for scripted callers
//! - Recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bikeparking operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Config (exit 2)
    ConfigError,
    DirtyWorkingTree,

    // Parse (exit 3)
    ParseError,

    // Validation (exit 4)
    ValidationError,

    // Network (exit 5)
    NetworkError,

    // Publish (exit 6)
    PublishError,

    // I/O (exit 7)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::ConfigError => "CONFIG_ERROR",
            Self::DirtyWorkingTree => "DIRTY_WORKING_TREE",
            Self::ParseError => "PARSE_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::PublishError => "PUBLISH_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-7).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::ConfigError | Self::DirtyWorkingTree => 2,
            Self::ParseError => 3,
            Self::ValidationError => 4,
            Self::NetworkError => 5,
            Self::PublishError => 6,
            Self::IoError | Self::JsonError => 7,
        }
    }

    /// Whether a caller should retry after correcting its input.
    ///
    /// True for configuration problems (set the variable, rerun) and a
    /// dirty working tree (commit or stash, rerun). The pipeline itself
    /// never retries anything: network and publish failures are final.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConfigError | Self::DirtyWorkingTree)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in bikeparking CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required environment variable: {name}")]
    MissingEnv { name: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Working tree has uncommitted changes: {}", files.join(", "))]
    DirtyWorkingTree { files: Vec<String> },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Export rejected: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("git {op} failed: {detail}")]
    Git { op: String, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingEnv { .. } | Self::Config(_) => ErrorCode::ConfigError,
            Self::DirtyWorkingTree { .. } => ErrorCode::DirtyWorkingTree,
            Self::Parse { .. } => ErrorCode::ParseError,
            Self::Validation(_) => ErrorCode::ValidationError,
            Self::Network(_) => ErrorCode::NetworkError,
            Self::Git { .. } => ErrorCode::PublishError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for humans and scripts.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingEnv { name } => match *name {
                crate::config::ENV_COOKIE => Some(
                    "Copy the _felt_session cookie value from a logged-in \
                     browser session and export it as FELT_COOKIE."
                        .to_string(),
                ),
                crate::config::ENV_MAP_ID => Some(
                    "The map identifier is the last path segment of the map's \
                     URL. Export it as FELT_MAP_ID."
                        .to_string(),
                ),
                other => Some(format!("Set {other} and rerun.")),
            },

            Self::DirtyWorkingTree { files } => {
                let mut hint = String::from("Uncommitted changes to tracked files:\n");
                for file in files {
                    hint.push_str(&format!("    {file}\n"));
                }
                hint.push_str(
                    "  Commit or stash them, or rerun with --force-clean to \
                     restore tracked files to HEAD (untracked files are never touched).",
                );
                Some(hint)
            }

            Self::Parse { .. } => Some(
                "Both inputs must be GeoJSON documents with a `features` array."
                    .to_string(),
            ),

            Self::Validation(_) => Some(
                "The remote export must be a FeatureCollection with at least \
                 one feature. The local dataset was left untouched."
                    .to_string(),
            ),

            Self::Git { op, .. } if op == "push" => Some(
                "The remote may have commits this clone does not. Reconcile \
                 manually (pull/rebase) and rerun; the pipeline never rebases on its own."
                    .to_string(),
            ),

            Self::Config(_)
            | Self::Network(_)
            | Self::Git { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint. Scripts parse this instead of stderr text.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
