//! Merge command implementation.
//!
//! Combines the curated base layer with a partial layer (typically the
//! photo-derived one) into a single collection. The output is a candidate:
//! a human reviews it before it replaces the authoritative dataset.

use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::DATASET_FILE;
use crate::error::Result;
use crate::geojson;
use crate::sync::atomic_write;

/// Execute the merge command.
///
/// # Errors
///
/// Returns `Error::Parse` if either input is not a feature collection,
/// or an I/O error if reading or writing fails.
pub fn execute(base: &Path, partial: &Path, output: Option<&Path>, json: bool) -> Result<()> {
    let base_collection = geojson::read_collection(base)?;
    let partial_collection = geojson::read_collection(partial)?;

    let merged = geojson::merge(&base_collection, &partial_collection);
    let out_path: PathBuf = output.map_or_else(|| PathBuf::from(DATASET_FILE), Path::to_path_buf);

    let body = geojson::to_pretty_json(&merged)?;
    atomic_write(&out_path, &body)?;

    if json {
        let payload = serde_json::json!({
            "base_features": base_collection.features.len(),
            "partial_features": partial_collection.features.len(),
            "total_features": merged.features.len(),
            "output": out_path.display().to_string(),
        });
        println!("{}", serde_json::to_string(&payload)?);
        return Ok(());
    }

    println!(
        "{} Merged {} + {} features into {}",
        "✓".green(),
        base_collection.features.len(),
        partial_collection.features.len(),
        out_path.display().to_string().bold()
    );
    println!("  Review the result before committing it as the authoritative dataset.");

    Ok(())
}
