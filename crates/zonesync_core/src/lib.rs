//! # ZoneSync Core
//!
//! Zone model and edit-session tracking for ZoneSync.
//!
//! This crate provides:
//! - `Zone` and `Geometry` types with GeoJSON boundary parsing
//! - `ZoneSession` holding the zone collection and its change tracker
//! - `EditMode` for the mutually exclusive draw/modify toggle
//!
//! ## Key Invariants
//!
//! - A zone id carries at most one pending status (Inserted, Modified or
//!   Deleted) at any time
//! - An inserted-then-modified zone stays classified as an insert
//! - Deleting a never-persisted insert purges the id from tracking entirely;
//!   no delete is ever scheduled for an id the server has not seen
//! - The collection and the tracker are only mutated together

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod geojson;
mod geometry;
mod mode;
mod session;
mod zone;

pub use geojson::{parse_feature_collection, GeoJsonError};
pub use geometry::{Geometry, Position, Ring};
pub use mode::EditMode;
pub use session::{ChangeSet, OperationSummary, ZoneSession, ZoneStatus};
pub use zone::Zone;
