//! Fetching the hosted map export.
//!
//! The map is maintained in a hosted editor with no public export API, so
//! the fetch attaches a logged-in browser session cookie to a plain GET.
//! Fragile and manually maintained by nature; failures are fatal and never
//! retried. Every fetched body passes the shape check in
//! [`validate_export`] before anything local is overwritten.

use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::geojson::{FEATURE_COLLECTION, FeatureCollection};

/// A fetched export: the exact response bytes plus their validated parse.
///
/// The raw body is what gets written to disk, so the committed file matches
/// the remote byte-for-byte instead of being re-serialized.
#[derive(Debug)]
pub struct Export {
    pub raw: String,
    pub collection: FeatureCollection,
}

/// Something that can produce a candidate export body.
///
/// The sync orchestrator only sees this trait, so the cookie-backed source
/// can be swapped for another auth scheme, or a stub in tests, without
/// touching the pipeline's state machine.
pub trait ExportSource {
    /// Retrieve the raw export body.
    ///
    /// # Errors
    ///
    /// Returns `Error::Network` on any transport failure or non-success
    /// HTTP status.
    fn fetch_raw(&self) -> Result<String>;

    /// Retrieve and validate the export.
    ///
    /// # Errors
    ///
    /// Propagates `fetch_raw` failures, or returns `Error::Validation` if
    /// the body fails the shape check.
    fn fetch(&self) -> Result<Export> {
        let raw = self.fetch_raw()?;
        let collection = validate_export(&raw)?;
        Ok(Export { raw, collection })
    }
}

/// Cookie-authenticated export source against the hosted map editor.
pub struct FeltExportSource {
    client: reqwest::blocking::Client,
    config: SyncConfig,
}

impl FeltExportSource {
    #[must_use]
    pub fn new(config: SyncConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            config,
        }
    }

    fn export_url(&self) -> String {
        format!(
            "{}/map/{}/export/geojson",
            self.config.base_url, self.config.map_id
        )
    }
}

impl ExportSource for FeltExportSource {
    fn fetch_raw(&self) -> Result<String> {
        let url = self.export_url();
        tracing::info!(%url, "fetching map export");

        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::COOKIE,
                format!("_felt_session={}", self.config.session_cookie),
            )
            .send()
            .map_err(|e| Error::Network(format!("export request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            // An expired session typically surfaces as a redirect-to-login
            // or a 401 here, not as a parse failure later.
            return Err(Error::Network(format!(
                "export request returned {status} for {url}"
            )));
        }

        response
            .text()
            .map_err(|e| Error::Network(format!("failed to read export body: {e}")))
    }
}

/// Shape check for a fetched export body.
///
/// Accepts only a JSON document that is a `FeatureCollection` with a
/// non-empty `features` array. Individual features stay opaque.
///
/// # Errors
///
/// Returns `Error::Validation` if the body is not JSON, lacks a `features`
/// field, carries the wrong type tag, or has zero features.
pub fn validate_export(body: &str) -> Result<FeatureCollection> {
    let collection: FeatureCollection = serde_json::from_str(body)
        .map_err(|e| Error::Validation(format!("export is not a feature collection: {e}")))?;

    if collection.kind != FEATURE_COLLECTION {
        return Err(Error::Validation(format!(
            "unexpected type tag: {}",
            collection.kind
        )));
    }

    if collection.features.is_empty() {
        return Err(Error::Validation("export contains no features".to_string()));
    }

    Ok(collection)
}
