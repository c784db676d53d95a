//! WFS-T transaction document compilation.
//!
//! All pending edits are compiled into one atomic `wfs:Transaction` with
//! operations in fixed insert → update → delete order. Servers that apply
//! operations in document order rely on that ordering; ordering inside a
//! group carries no guarantee.

use crate::error::{CodecError, CodecResult};
use crate::gml::encode_geometry;
use crate::xml::XmlElement;
use tracing::debug;
use zonesync_core::{ChangeSet, Zone};

/// Name default applied at compile time when the property is absent.
pub const DEFAULT_NAME: &str = "Sans nom";

/// Type default applied at compile time when the property is absent.
pub const DEFAULT_TYPE: &str = "Aucun type";

const WFS_NS: &str = "http://www.opengis.net/wfs";
const OGC_NS: &str = "http://www.opengis.net/ogc";
const GML_NS: &str = "http://www.opengis.net/gml";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const WFS_SCHEMA_LOCATION: &str =
    "http://www.opengis.net/wfs http://schemas.opengis.net/wfs/1.1.0/wfs.xsd";

/// The qualified feature type a transaction targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureType {
    /// Namespace prefix, e.g. `geoimage`.
    pub prefix: String,
    /// Local type name, e.g. `zones`.
    pub local_name: String,
    /// Namespace URI bound to the prefix.
    pub namespace_uri: String,
}

impl FeatureType {
    /// Parses a `prefix:name` pair with its namespace URI.
    pub fn parse(qualified: &str, namespace_uri: impl Into<String>) -> CodecResult<Self> {
        match qualified.split_once(':') {
            Some((prefix, local_name)) if !prefix.is_empty() && !local_name.is_empty() => {
                Ok(Self {
                    prefix: prefix.to_string(),
                    local_name: local_name.to_string(),
                    namespace_uri: namespace_uri.into(),
                })
            }
            _ => Err(CodecError::InvalidFeatureType {
                value: qualified.to_string(),
            }),
        }
    }

    /// Returns the qualified `prefix:name` form.
    #[must_use]
    pub fn qualified(&self) -> String {
        format!("{}:{}", self.prefix, self.local_name)
    }

    fn property_name(&self, name: &str) -> String {
        format!("{}:{}", self.prefix, name)
    }
}

/// Compiles the pending changes into one WFS-T document.
///
/// Returns `None` when the change set is empty; callers must not submit an
/// empty transaction. Property defaults are applied here, not in the stored
/// zones.
#[must_use]
pub fn compile_transaction(changes: &ChangeSet, feature_type: &FeatureType) -> Option<String> {
    if changes.is_empty() {
        return None;
    }

    let mut transaction = XmlElement::new("wfs:Transaction")
        .attr("service", "WFS")
        .attr("version", "1.1.0")
        .attr("xmlns:wfs", WFS_NS)
        .attr("xmlns:ogc", OGC_NS)
        .attr("xmlns:gml", GML_NS)
        .attr(
            format!("xmlns:{}", feature_type.prefix),
            &feature_type.namespace_uri,
        )
        .attr("xmlns:xsi", XSI_NS)
        .attr("xsi:schemaLocation", WFS_SCHEMA_LOCATION);

    for zone in &changes.inserted {
        transaction.push_child(insert_operation(zone, feature_type));
    }
    for zone in &changes.modified {
        transaction.push_child(update_operation(zone, feature_type));
    }
    for id in &changes.deleted {
        transaction.push_child(delete_operation(id, feature_type));
    }

    debug!(
        inserted = changes.inserted.len(),
        modified = changes.modified.len(),
        deleted = changes.deleted.len(),
        "compiled transaction"
    );

    Some(transaction.to_string())
}

fn insert_operation(zone: &Zone, feature_type: &FeatureType) -> XmlElement {
    let mut geom = XmlElement::new(feature_type.property_name("geom"));
    if let Some(gml) = encode_geometry(&zone.geometry) {
        geom.push_child(gml);
    }

    let feature = XmlElement::new(feature_type.qualified())
        .child(geom)
        .child(XmlElement::new(feature_type.property_name("name")).text(name_of(zone)))
        .child(XmlElement::new(feature_type.property_name("type")).text(type_of(zone)));

    XmlElement::new("wfs:Insert").child(feature)
}

fn update_operation(zone: &Zone, feature_type: &FeatureType) -> XmlElement {
    let mut geom_value = XmlElement::new("wfs:Value");
    if let Some(gml) = encode_geometry(&zone.geometry) {
        geom_value.push_child(gml);
    }

    XmlElement::new("wfs:Update")
        .attr("typeName", feature_type.qualified())
        .child(
            XmlElement::new("wfs:Property")
                .child(XmlElement::new("wfs:Name").text("geom"))
                .child(geom_value),
        )
        .child(wfs_property("name", name_of(zone)))
        .child(wfs_property("type", type_of(zone)))
        .child(identity_filter(&zone.id))
}

fn delete_operation(id: &str, feature_type: &FeatureType) -> XmlElement {
    XmlElement::new("wfs:Delete")
        .attr("typeName", feature_type.qualified())
        .child(identity_filter(id))
}

fn wfs_property(name: &str, value: &str) -> XmlElement {
    XmlElement::new("wfs:Property")
        .child(XmlElement::new("wfs:Name").text(name))
        .child(XmlElement::new("wfs:Value").text(value))
}

fn identity_filter(id: &str) -> XmlElement {
    XmlElement::new("ogc:Filter").child(XmlElement::new("ogc:FeatureId").attr("fid", id))
}

fn name_of(zone: &Zone) -> &str {
    zone.property("name").unwrap_or(DEFAULT_NAME)
}

fn type_of(zone: &Zone) -> &str {
    zone.property("type").unwrap_or(DEFAULT_TYPE)
}
