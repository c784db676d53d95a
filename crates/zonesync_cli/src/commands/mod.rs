//! Command implementations.

pub mod compile;
pub mod fetch;
pub mod push;

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::warn;
use zonesync_core::{Zone, ZoneSession};

/// An edit script: the file-based stand-in for the drawing collaborator.
///
/// ```json
/// {
///   "insert": [ <GeoJSON Feature>, ... ],
///   "update": [ <GeoJSON Feature>, ... ],
///   "delete": [ "zone-id", ... ]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct EditScript {
    /// Features to insert.
    #[serde(default)]
    pub insert: Vec<Value>,
    /// Features to update, matched by id.
    #[serde(default)]
    pub update: Vec<Value>,
    /// Ids to delete.
    #[serde(default)]
    pub delete: Vec<String>,
}

impl EditScript {
    /// Reads an edit script from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Applies the script to a session through the tracked edit operations.
    ///
    /// Features that cannot be parsed and updates for unknown ids are
    /// skipped with a warning.
    pub fn apply(&self, session: &mut ZoneSession) {
        for feature in &self.insert {
            match Zone::from_feature(feature) {
                Some(zone) => session.insert(zone),
                None => warn!("skipping insert without usable geometry"),
            }
        }
        for feature in &self.update {
            match Zone::from_feature(feature) {
                Some(zone) => {
                    let id = zone.id.clone();
                    if !session.update(zone) {
                        warn!(id, "skipping update for unknown zone");
                    }
                }
                None => warn!("skipping update without usable geometry"),
            }
        }
        for id in &self.delete {
            session.remove(id);
        }
    }
}
