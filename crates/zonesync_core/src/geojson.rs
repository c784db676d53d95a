//! GeoJSON feature collection parsing.
//!
//! This is the boundary format shared with the feature server and the
//! drawing collaborator. Parsing is lenient per feature: a feature with an
//! unusable geometry is skipped with a diagnostic rather than failing the
//! whole collection.

use crate::zone::Zone;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Errors produced while parsing a GeoJSON document.
#[derive(Debug, Error)]
pub enum GeoJsonError {
    /// The document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is valid JSON but not a FeatureCollection.
    #[error("not a FeatureCollection: found type {found:?}")]
    NotAFeatureCollection {
        /// The `type` value found, if any.
        found: Option<String>,
    },
}

/// Parses a GeoJSON FeatureCollection document into zones.
///
/// Features that cannot be converted (no geometry, malformed coordinates)
/// are skipped with a warning.
pub fn parse_feature_collection(body: &str) -> Result<Vec<Zone>, GeoJsonError> {
    let document: Value = serde_json::from_str(body)?;

    let kind = document.get("type").and_then(Value::as_str);
    if kind != Some("FeatureCollection") {
        return Err(GeoJsonError::NotAFeatureCollection {
            found: kind.map(String::from),
        });
    }

    let features = document
        .get("features")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut zones = Vec::with_capacity(features.len());
    for feature in &features {
        match Zone::from_feature(feature) {
            Some(zone) => zones.push(zone),
            None => {
                warn!(
                    id = feature.get("id").and_then(serde_json::Value::as_str),
                    "skipping feature without usable geometry"
                );
            }
        }
    }

    Ok(zones)
}
