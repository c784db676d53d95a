//! The edit session: zone collection plus change tracker.
//!
//! A session is created (or reset) from a server snapshot and mutated only
//! through the tracked edit operations. Pending changes are held as a single
//! map from zone id to status, which mechanically enforces that an id never
//! carries more than one pending status.

use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pending status of a zone relative to the last loaded server snapshot.
///
/// Unchanged zones carry no entry at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneStatus {
    /// Created locally, not yet confirmed by the server.
    Inserted,
    /// Present in the last snapshot, changed locally.
    Modified,
    /// To be removed server-side.
    Deleted,
}

/// A point-in-time snapshot of the pending changes, with cloned zones.
///
/// This is the unit the transaction compiler and the save path consume:
/// a save captures one `ChangeSet` at entry and reconciles against exactly
/// that set, so edits arriving during the request are never silently
/// dropped from tracking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    /// Zones pending insertion, in id order.
    pub inserted: Vec<Zone>,
    /// Zones pending update, in id order.
    pub modified: Vec<Zone>,
    /// Ids pending deletion, in id order.
    pub deleted: Vec<String>,
}

impl ChangeSet {
    /// Returns true if no changes are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    /// Returns the total number of pending operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inserted.len() + self.modified.len() + self.deleted.len()
    }
}

/// The three pending id lists, for audit and debug inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSummary {
    /// Ids pending insertion.
    pub inserted: Vec<String>,
    /// Ids pending update.
    pub modified: Vec<String>,
    /// Ids pending deletion.
    pub deleted: Vec<String>,
}

/// An in-memory zone collection with pending-change tracking.
///
/// Owned by the caller and passed into sync operations; there is no ambient
/// singleton. All state is session-local and lives only in memory.
#[derive(Debug, Default)]
pub struct ZoneSession {
    zones: Vec<Zone>,
    statuses: BTreeMap<String, ZoneStatus>,
}

impl ZoneSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session baselined on a server snapshot.
    #[must_use]
    pub fn from_snapshot(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            statuses: BTreeMap::new(),
        }
    }

    /// Returns the zones currently in the collection.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Looks up a zone by id.
    #[must_use]
    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Returns the pending status of an id, if any.
    #[must_use]
    pub fn status(&self, id: &str) -> Option<ZoneStatus> {
        self.statuses.get(id).copied()
    }

    /// Returns true if any change is pending.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.statuses.is_empty()
    }

    /// Adds a new zone and tracks it as inserted.
    pub fn insert(&mut self, zone: Zone) {
        self.statuses.insert(zone.id.clone(), ZoneStatus::Inserted);
        self.zones.push(zone);
    }

    /// Replaces an existing zone by id and tracks it as modified.
    ///
    /// Returns false (and leaves tracking untouched) when the id is not in
    /// the collection. A zone still pending insertion stays classified as an
    /// insert.
    pub fn update(&mut self, zone: Zone) -> bool {
        let Some(slot) = self.zones.iter_mut().find(|z| z.id == zone.id) else {
            return false;
        };

        if self.statuses.get(&zone.id) != Some(&ZoneStatus::Inserted) {
            self.statuses.insert(zone.id.clone(), ZoneStatus::Modified);
        }
        *slot = zone;
        true
    }

    /// Removes a zone by id and tracks the deletion.
    ///
    /// A pending insert is cancelled outright: the id is purged from
    /// tracking and no delete will be emitted for it, since the server has
    /// never seen the id. A pending modify collapses into the delete.
    pub fn remove(&mut self, id: &str) {
        self.zones.retain(|z| z.id != id);

        match self.statuses.get(id) {
            Some(ZoneStatus::Inserted) => {
                self.statuses.remove(id);
            }
            _ => {
                self.statuses.insert(id.to_string(), ZoneStatus::Deleted);
            }
        }
    }

    /// Returns the three pending id lists for inspection.
    #[must_use]
    pub fn operation_summary(&self) -> OperationSummary {
        let mut summary = OperationSummary::default();
        for (id, status) in &self.statuses {
            match status {
                ZoneStatus::Inserted => summary.inserted.push(id.clone()),
                ZoneStatus::Modified => summary.modified.push(id.clone()),
                ZoneStatus::Deleted => summary.deleted.push(id.clone()),
            }
        }
        summary
    }

    /// Captures the pending changes as a snapshot with cloned zones.
    ///
    /// Inserted or modified ids whose zone has meanwhile vanished from the
    /// collection are not possible through the tracked operations, so the
    /// lookup is infallible in practice; defensively, such an id would
    /// simply be omitted.
    #[must_use]
    pub fn change_set(&self) -> ChangeSet {
        let mut set = ChangeSet::default();
        for (id, status) in &self.statuses {
            match status {
                ZoneStatus::Inserted => {
                    if let Some(zone) = self.zone(id) {
                        set.inserted.push(zone.clone());
                    }
                }
                ZoneStatus::Modified => {
                    if let Some(zone) = self.zone(id) {
                        set.modified.push(zone.clone());
                    }
                }
                ZoneStatus::Deleted => set.deleted.push(id.clone()),
            }
        }
        set
    }

    /// Replaces the collection with a fresh server snapshot and clears all
    /// tracking. Load path only.
    pub fn replace_all(&mut self, zones: Vec<Zone>) {
        self.zones = zones;
        self.statuses.clear();
    }

    /// Clears tracking for exactly the ids captured in a saved snapshot.
    ///
    /// Post-save reconciliation: changes recorded after the snapshot was
    /// taken keep their status and will be part of the next save.
    pub fn clear_statuses(&mut self, saved: &ChangeSet) {
        for zone in saved.inserted.iter().chain(saved.modified.iter()) {
            self.statuses.remove(&zone.id);
        }
        for id in &saved.deleted {
            self.statuses.remove(id);
        }
    }
}
