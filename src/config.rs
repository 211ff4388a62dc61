//! Environment configuration for the sync pipeline.
//!
//! The hosted map editor has no public API, so the export rides a
//! logged-in browser session: the cookie value and the map identifier both
//! come from the environment. Both are required; either missing aborts the
//! run before any network call is made.

use crate::error::{Error, Result};

/// The authoritative dataset file, relative to the repository root.
pub const DATASET_FILE: &str = "bikeparking.geojson";

/// Fixed commit message for automated sync commits.
pub const COMMIT_MESSAGE: &str = "Update bike parking data from map export";

/// Session cookie value for the hosted map editor.
pub const ENV_COOKIE: &str = "FELT_COOKIE";

/// Identifier of the hosted map to export.
pub const ENV_MAP_ID: &str = "FELT_MAP_ID";

/// Optional override of the export endpoint base URL.
///
/// Exists so tests and mirrors can redirect the fetch.
pub const ENV_BASE_URL: &str = "FELT_BASE_URL";

/// Default export endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://felt.com";

/// Resolved sync configuration.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Opaque session cookie value (never logged).
    pub session_cookie: String,
    /// Remote map identifier.
    pub map_id: String,
    /// Export endpoint base URL, without a trailing slash.
    pub base_url: String,
}

impl SyncConfig {
    /// Resolve configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingEnv` if a required variable is absent or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary lookup function.
    ///
    /// Split out from [`SyncConfig::from_env`] so tests can supply values
    /// without mutating the process environment.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingEnv` if a required variable is absent or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let session_cookie = required(&lookup, ENV_COOKIE)?;
        let map_id = required(&lookup, ENV_MAP_ID)?;

        let base_url = lookup(ENV_BASE_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self { session_cookie, map_id, base_url })
    }
}

fn required(lookup: impl Fn(&str) -> Option<String>, name: &'static str) -> Result<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingEnv { name })
}
