//! GeoJSON→GML geometry encoding.

use crate::xml::XmlElement;
use tracing::warn;
use zonesync_core::{Geometry, Position, Ring};

/// Spatial reference declared on every emitted geometry element.
pub const SRS_NAME: &str = "urn:x-ogc:def:crs:EPSG:4326";

/// Encodes a geometry as a GML element.
///
/// Returns `None` for unsupported geometry kinds after logging a
/// diagnostic; callers emit an empty fragment and continue, never failing
/// a whole transaction over one bad geometry.
///
/// Coordinate order: polygon rings are flipped to `lat lon` as the target
/// CRS requires, while points are emitted unflipped as `x y`. The asymmetry
/// matches what the server accepts today; do not change it without a
/// correctness review against the live schema.
#[must_use]
pub fn encode_geometry(geometry: &Geometry) -> Option<XmlElement> {
    match geometry {
        Geometry::Point(position) => Some(encode_point(*position)),
        Geometry::Polygon(ring) => Some(encode_polygon(ring)),
        Geometry::MultiPolygon(rings) => Some(encode_multi_polygon(rings)),
        Geometry::Unsupported(kind) => {
            warn!(kind, "unsupported geometry type, emitting empty fragment");
            None
        }
    }
}

fn encode_point(position: Position) -> XmlElement {
    XmlElement::new("gml:Point")
        .attr("srsName", SRS_NAME)
        .child(XmlElement::new("gml:pos").text(format!("{} {}", position.x, position.y)))
}

fn encode_polygon(ring: &Ring) -> XmlElement {
    XmlElement::new("gml:Polygon")
        .attr("srsName", SRS_NAME)
        .child(
            XmlElement::new("gml:exterior").child(
                XmlElement::new("gml:LinearRing")
                    .child(XmlElement::new("gml:posList").text(pos_list(ring))),
            ),
        )
}

/// One `gml:polygonMember` around all polygons, not one per polygon.
/// Wire-compat quirk; see the crate docs.
fn encode_multi_polygon(rings: &[Ring]) -> XmlElement {
    let mut member = XmlElement::new("gml:polygonMember");
    for ring in rings {
        member.push_child(encode_polygon(ring));
    }

    XmlElement::new("gml:MultiPolygon")
        .attr("srsName", SRS_NAME)
        .child(member)
}

/// Space-separated `lat lon` pairs, point order preserved.
fn pos_list(ring: &Ring) -> String {
    ring.iter()
        .map(|p| format!("{} {}", p.y, p.x))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn point_is_unflipped() {
        // Regression pin: points keep GeoJSON (x, y) order on the wire.
        let gml = encode_geometry(&Geometry::Point(Position::new(1.0, 2.0))).unwrap();
        assert_eq!(
            gml.to_string(),
            format!(r#"<gml:Point srsName="{SRS_NAME}"><gml:pos>1 2</gml:pos></gml:Point>"#)
        );
    }

    #[test]
    fn polygon_flips_to_lat_lon() {
        let ring = vec![
            Position::new(10.0, 45.0),
            Position::new(11.0, 46.0),
            Position::new(10.0, 45.0),
        ];
        let gml = encode_geometry(&Geometry::Polygon(ring)).unwrap();
        let rendered = gml.to_string();
        assert!(rendered.contains("<gml:posList>45 10 46 11 45 10</gml:posList>"));
        assert!(rendered.contains("<gml:exterior><gml:LinearRing>"));
        assert!(rendered.contains(SRS_NAME));
    }

    #[test]
    fn multi_polygon_has_single_member_wrapper() {
        let rings = vec![
            vec![Position::new(0.0, 0.0), Position::new(1.0, 0.0)],
            vec![Position::new(5.0, 5.0), Position::new(6.0, 5.0)],
        ];
        let gml = encode_geometry(&Geometry::MultiPolygon(rings)).unwrap();
        let rendered = gml.to_string();

        assert_eq!(rendered.matches("<gml:polygonMember>").count(), 1);
        assert_eq!(rendered.matches("<gml:Polygon").count(), 2);
    }

    #[test]
    fn unsupported_kind_is_skipped() {
        assert!(encode_geometry(&Geometry::Unsupported("LineString".into())).is_none());
    }

    proptest! {
        #[test]
        fn polygon_pos_list_preserves_count_and_flips(
            coords in prop::collection::vec((-180.0f64..180.0, -90.0f64..90.0), 1..32)
        ) {
            let ring: Ring = coords.iter().map(|&(x, y)| Position::new(x, y)).collect();
            let rendered = encode_geometry(&Geometry::Polygon(ring.clone()))
                .unwrap()
                .to_string();

            let start = rendered.find("<gml:posList>").unwrap() + "<gml:posList>".len();
            let end = rendered.find("</gml:posList>").unwrap();
            let values: Vec<&str> = rendered[start..end].split(' ').collect();

            prop_assert_eq!(values.len(), ring.len() * 2);
            for (i, p) in ring.iter().enumerate() {
                prop_assert_eq!(values[2 * i], p.y.to_string());
                prop_assert_eq!(values[2 * i + 1], p.x.to_string());
            }
        }
    }
}
