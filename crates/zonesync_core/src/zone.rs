//! The zone entity.

use crate::geometry::Geometry;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A single geospatial zone.
///
/// The id is server-assigned once the zone has been persisted; zones created
/// locally carry a temporary id until the first successful save re-baselines
/// the collection against the server.
///
/// Properties are stored as given. The `name`/`type` defaults required by the
/// transaction schema are applied at compile time, not here, so a stored zone
/// may legitimately have missing properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Stable zone identity.
    pub id: String,
    /// Zone geometry.
    pub geometry: Geometry,
    /// Descriptive properties.
    pub properties: BTreeMap<String, String>,
}

impl Zone {
    /// Creates a zone with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            geometry,
            properties: BTreeMap::new(),
        }
    }

    /// Creates a zone with a generated temporary id.
    ///
    /// Used for locally drawn zones that have not been given an id by the
    /// caller.
    #[must_use]
    pub fn with_temporary_id(geometry: Geometry) -> Self {
        Self::new(format!("tmp-{}", Uuid::new_v4()), geometry)
    }

    /// Sets a property, builder style.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Returns a property value by key.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Parses a zone from a GeoJSON feature object.
    ///
    /// Returns `None` when the feature has no usable geometry. A missing id
    /// yields a generated temporary id. Non-string property values are
    /// stringified; nulls are dropped.
    #[must_use]
    pub fn from_feature(feature: &Value) -> Option<Self> {
        let geometry = Geometry::from_geojson(feature.get("geometry")?)?;

        let id = match feature.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => format!("tmp-{}", Uuid::new_v4()),
        };

        let mut properties = BTreeMap::new();
        if let Some(Value::Object(map)) = feature.get("properties") {
            for (key, value) in map {
                if let Some(text) = property_text(value) {
                    properties.insert(key.clone(), text);
                }
            }
        }

        Some(Self {
            id,
            geometry,
            properties,
        })
    }

    /// Renders this zone as a GeoJSON feature object.
    #[must_use]
    pub fn to_feature(&self) -> Value {
        let mut properties = Map::new();
        for (key, value) in &self.properties {
            properties.insert(key.clone(), Value::String(value.clone()));
        }

        json!({
            "type": "Feature",
            "id": self.id,
            "geometry": self.geometry.to_geojson(),
            "properties": Value::Object(properties),
        })
    }
}

fn property_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
