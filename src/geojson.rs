//! GeoJSON feature collection parsing and merging.
//!
//! The dataset is a `FeatureCollection` whose individual features are
//! opaque: the merge never looks inside a feature, so a malformed geometry
//! in a community submission passes through unchanged rather than being
//! silently fixed or dropped. Only the wrapper shape is interpreted here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// The GeoJSON type tag for a collection wrapper.
pub const FEATURE_COLLECTION: &str = "FeatureCollection";

/// A GeoJSON feature collection with opaque features.
///
/// Foreign members of the wrapper object (a `bbox`, editor metadata) are
/// carried through parse and serialize untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection_tag")]
    pub kind: String,

    /// Ordered features. Order carries no meaning but is preserved for
    /// reproducible diffs.
    pub features: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn feature_collection_tag() -> String {
    FEATURE_COLLECTION.to_string()
}

impl FeatureCollection {
    /// An empty collection.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            kind: feature_collection_tag(),
            features: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Concatenate two collections: `a`'s features followed by `b`'s.
///
/// No deduplication, reordering, or conflict resolution happens here.
/// Overlapping features across the two layers are preserved as-is; a human
/// reviews the output before promoting it to the authoritative dataset.
/// Inputs are not mutated.
#[must_use]
pub fn merge(a: &FeatureCollection, b: &FeatureCollection) -> FeatureCollection {
    let mut features = Vec::with_capacity(a.features.len() + b.features.len());
    features.extend(a.features.iter().cloned());
    features.extend(b.features.iter().cloned());

    FeatureCollection {
        kind: feature_collection_tag(),
        features,
        extra: Map::new(),
    }
}

/// Read and parse a feature collection from disk.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, or `Error::Parse` if it
/// is not a JSON document with a `features` array.
pub fn read_collection(path: &Path) -> Result<FeatureCollection> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Serialize a collection as pretty-printed JSON (2-space indent) with a
/// trailing newline, matching the layout of the hand-curated layers.
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
pub fn to_pretty_json(collection: &FeatureCollection) -> Result<String> {
    let mut body = serde_json::to_string_pretty(collection)?;
    body.push('\n');
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection_of(ids: &[u32]) -> FeatureCollection {
        FeatureCollection {
            kind: FEATURE_COLLECTION.to_string(),
            features: ids
                .iter()
                .map(|id| {
                    json!({
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [-63.57, 44.65]},
                        "properties": {"id": id, "Type": "Ring"},
                    })
                })
                .collect(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_merge_concatenates_in_order() {
        let base = collection_of(&[1, 2, 3]);
        let partial = collection_of(&[4, 5]);

        let merged = merge(&base, &partial);

        assert_eq!(merged.kind, FEATURE_COLLECTION);
        assert_eq!(merged.features.len(), 5);
        for (i, feature) in merged.features.iter().enumerate() {
            let id = feature["properties"]["id"].as_u64().unwrap();
            assert_eq!(id, i as u64 + 1, "base features precede partial features");
        }
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let base = collection_of(&[1]);
        let partial = collection_of(&[2]);

        let _ = merge(&base, &partial);

        assert_eq!(base.features.len(), 1);
        assert_eq!(partial.features.len(), 1);
    }

    #[test]
    fn test_merge_preserves_duplicates() {
        let base = collection_of(&[7]);
        let partial = collection_of(&[7]);

        let merged = merge(&base, &partial);
        assert_eq!(merged.features.len(), 2);
        assert_eq!(merged.features[0], merged.features[1]);
    }

    #[test]
    fn test_merge_is_associative() {
        let a = collection_of(&[1, 2]);
        let b = collection_of(&[3]);
        let c = collection_of(&[4, 5]);

        let left = merge(&merge(&a, &b), &c);
        let right = merge(&a, &merge(&b, &c));
        assert_eq!(left.features, right.features);
    }

    #[test]
    fn test_merge_with_empty_sides() {
        let base = collection_of(&[1, 2]);
        let empty = FeatureCollection::empty();

        assert_eq!(merge(&base, &empty).features.len(), 2);
        assert_eq!(merge(&empty, &base).features.len(), 2);
        assert!(merge(&empty, &empty).features.is_empty());
    }

    #[test]
    fn test_read_collection_missing_features_is_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.geojson");
        fs::write(&path, r#"{"type": "FeatureCollection"}"#).unwrap();

        let err = read_collection(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_read_collection_non_json_is_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.geojson");
        fs::write(&path, "not json at all").unwrap();

        assert!(matches!(read_collection(&path), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_wrapper_foreign_members_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("extra.geojson");
        fs::write(
            &path,
            r#"{"type": "FeatureCollection", "features": [], "bbox": [-64.0, 44.0, -63.0, 45.0]}"#,
        )
        .unwrap();

        let collection = read_collection(&path).unwrap();
        assert!(collection.extra.contains_key("bbox"));

        let body = to_pretty_json(&collection).unwrap();
        assert!(body.contains("bbox"));
        assert!(body.ends_with('\n'));
    }

    #[test]
    fn test_missing_type_tag_defaults() {
        let collection: FeatureCollection =
            serde_json::from_str(r#"{"features": []}"#).unwrap();
        assert_eq!(collection.kind, FEATURE_COLLECTION);
    }
}
