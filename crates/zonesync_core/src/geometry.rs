//! Geometry types for zones.
//!
//! Stored coordinates follow the GeoJSON convention: `(longitude, latitude)`.
//! Only the exterior ring of polygonal geometries is kept; interior rings
//! (holes) are dropped on ingest.

use serde_json::{json, Value};

/// A single coordinate pair in `(longitude, latitude)` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Longitude (GeoJSON x).
    pub x: f64,
    /// Latitude (GeoJSON y).
    pub y: f64,
}

impl Position {
    /// Creates a position from `(longitude, latitude)`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the longitude.
    #[must_use]
    pub const fn lon(self) -> f64 {
        self.x
    }

    /// Returns the latitude.
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.y
    }
}

/// An ordered exterior ring of positions.
pub type Ring = Vec<Position>;

/// A zone geometry.
///
/// Only the three variants the WFS feature type uses are modeled. Any other
/// GeoJSON geometry type is carried as `Unsupported` so that downstream
/// encoding can skip it with a diagnostic instead of failing the whole
/// transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single point.
    Point(Position),
    /// A polygon, exterior ring only.
    Polygon(Ring),
    /// A multi-polygon as an ordered sequence of exterior rings.
    MultiPolygon(Vec<Ring>),
    /// A geometry type the zone schema does not support.
    Unsupported(String),
}

impl Geometry {
    /// Returns the GeoJSON type name of this geometry.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::Unsupported(kind) => kind,
        }
    }

    /// Parses a GeoJSON geometry object.
    ///
    /// Unknown `type` values yield `Geometry::Unsupported`. Returns `None`
    /// when a known type carries malformed coordinates.
    #[must_use]
    pub fn from_geojson(value: &Value) -> Option<Self> {
        let kind = value.get("type")?.as_str()?;
        let coordinates = value.get("coordinates");

        match kind {
            "Point" => parse_position(coordinates?).map(Geometry::Point),
            "Polygon" => parse_exterior_ring(coordinates?).map(Geometry::Polygon),
            "MultiPolygon" => {
                let polys = coordinates?.as_array()?;
                let rings = polys
                    .iter()
                    .map(parse_exterior_ring)
                    .collect::<Option<Vec<Ring>>>()?;
                Some(Geometry::MultiPolygon(rings))
            }
            other => Some(Geometry::Unsupported(other.to_string())),
        }
    }

    /// Renders this geometry back to a GeoJSON geometry object.
    ///
    /// `Unsupported` renders as JSON null since the original coordinates
    /// were not retained.
    #[must_use]
    pub fn to_geojson(&self) -> Value {
        match self {
            Geometry::Point(p) => json!({
                "type": "Point",
                "coordinates": [p.x, p.y],
            }),
            Geometry::Polygon(ring) => json!({
                "type": "Polygon",
                "coordinates": [ring_coords(ring)],
            }),
            Geometry::MultiPolygon(rings) => json!({
                "type": "MultiPolygon",
                "coordinates": rings.iter().map(|r| vec![ring_coords(r)]).collect::<Vec<_>>(),
            }),
            Geometry::Unsupported(_) => Value::Null,
        }
    }
}

fn parse_position(value: &Value) -> Option<Position> {
    let pair = value.as_array()?;
    let x = pair.first()?.as_f64()?;
    let y = pair.get(1)?.as_f64()?;
    Some(Position::new(x, y))
}

/// Extracts the exterior ring (first member) of a GeoJSON polygon
/// coordinate array.
fn parse_exterior_ring(value: &Value) -> Option<Ring> {
    let rings = value.as_array()?;
    let exterior = rings.first()?.as_array()?;
    exterior.iter().map(parse_position).collect()
}

fn ring_coords(ring: &Ring) -> Vec<Vec<f64>> {
    ring.iter().map(|p| vec![p.x, p.y]).collect()
}
