//! # ZoneSync Codec
//!
//! GML geometry encoding and WFS-T transaction compilation.
//!
//! This crate provides:
//! - `XmlElement`, a structured element tree serialized once with escaping
//! - `encode_geometry` for GeoJSON→GML geometry fragments
//! - `compile_transaction` for building one atomic WFS-T document
//!
//! This is a pure codec crate with no I/O operations.
//!
//! ## Wire compatibility
//!
//! Two quirks of the target server's accepted payloads are preserved
//! deliberately and pinned by regression tests: point coordinates are
//! emitted unflipped (`x y`) while polygon rings are flipped to `lat lon`,
//! and a multi-polygon carries a single `gml:polygonMember` wrapper around
//! all of its polygons.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod gml;
mod transaction;
mod xml;

pub use error::{CodecError, CodecResult};
pub use gml::{encode_geometry, SRS_NAME};
pub use transaction::{compile_transaction, FeatureType, DEFAULT_NAME, DEFAULT_TYPE};
pub use xml::{XmlElement, XmlNode};
