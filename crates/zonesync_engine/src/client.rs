//! The sync client state machine.

use crate::config::WfsConfig;
use crate::error::{SyncError, SyncResult};
use crate::transport::WfsTransport;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};
use zonesync_codec::{compile_transaction, FeatureType};
use zonesync_core::ZoneSession;

/// The current state of the sync client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No sync has run yet.
    Idle,
    /// A load is in flight.
    Loading,
    /// A save is in flight.
    Saving,
    /// The last operation completed successfully.
    Synced,
    /// The last operation failed.
    Error,
}

/// Statistics about sync operations.
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Number of loads completed.
    pub loads_completed: u64,
    /// Number of saves completed.
    pub saves_completed: u64,
    /// Zones received across all loads.
    pub zones_loaded: u64,
    /// Insert/update/delete operations pushed across all saves.
    pub operations_pushed: u64,
    /// Most recent error message, cleared on the next success.
    pub last_error: Option<String>,
}

/// Outcome of a save call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing was pending; no network call was made.
    NoChanges,
    /// The transaction was accepted and the session re-baselined.
    Saved {
        /// Zones inserted.
        inserted: usize,
        /// Zones updated.
        modified: usize,
        /// Zones deleted.
        deleted: usize,
    },
}

/// Orchestrates load and save against a WFS transport.
///
/// The client holds no zone state of its own; it operates on a
/// caller-owned `ZoneSession` passed into each call.
pub struct SyncClient<T: WfsTransport> {
    feature_type: FeatureType,
    transport: T,
    state: RwLock<SyncState>,
    stats: RwLock<SyncStats>,
    save_in_flight: AtomicBool,
}

/// Releases the in-flight save guard on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<T: WfsTransport> SyncClient<T> {
    /// Creates a client for the configured feature type.
    pub fn new(config: &WfsConfig, transport: T) -> SyncResult<Self> {
        let feature_type = FeatureType::parse(&config.feature_type, &config.namespace_uri)?;
        Ok(Self {
            feature_type,
            transport,
            state: RwLock::new(SyncState::Idle),
            stats: RwLock::new(SyncStats::default()),
            save_in_flight: AtomicBool::new(false),
        })
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SyncState {
        *self.state.read()
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a copy of the current stats.
    #[must_use]
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// Returns the most recent error message, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.stats.read().last_error.clone()
    }

    /// Fetches the authoritative snapshot and re-baselines the session.
    ///
    /// On success the collection is replaced wholesale and all pending
    /// tracking is reset: a load is last-writer-wins against local edits.
    /// On failure the session is left untouched and the error recorded.
    ///
    /// Returns the number of zones loaded.
    pub fn load(&self, session: &mut ZoneSession) -> SyncResult<usize> {
        *self.state.write() = SyncState::Loading;

        match self.transport.fetch_features() {
            Ok(zones) => {
                let count = zones.len();
                if session.is_dirty() {
                    warn!("load is discarding pending local edits");
                }
                session.replace_all(zones);

                *self.state.write() = SyncState::Synced;
                let mut stats = self.stats.write();
                stats.loads_completed += 1;
                stats.zones_loaded += count as u64;
                stats.last_error = None;

                info!(count, "loaded zones");
                Ok(count)
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// Compiles and submits all pending changes as one atomic transaction.
    ///
    /// The change set is snapshotted at entry; on success only the
    /// snapshot's ids are cleared from tracking before an immediate load
    /// re-baselines the session. On failure pending changes are preserved
    /// and the save may be retried. A second save while one is in flight
    /// fails fast with `SyncError::SaveInProgress`.
    ///
    /// A reload failure after an accepted transaction surfaces as an
    /// error even though the changes were committed server-side;
    /// `stats().saves_completed` still records the accepted save.
    pub fn save(&self, session: &mut ZoneSession) -> SyncResult<SaveOutcome> {
        if self.save_in_flight.swap(true, Ordering::SeqCst) {
            return Err(SyncError::SaveInProgress);
        }
        let _guard = InFlightGuard(&self.save_in_flight);

        let snapshot = session.change_set();
        let Some(document) = compile_transaction(&snapshot, &self.feature_type) else {
            info!("save requested with no pending changes");
            return Ok(SaveOutcome::NoChanges);
        };

        *self.state.write() = SyncState::Saving;

        if let Err(e) = self.transport.submit_transaction(&document) {
            self.record_error(&e);
            return Err(e);
        }

        session.clear_statuses(&snapshot);
        {
            let mut stats = self.stats.write();
            stats.saves_completed += 1;
            stats.operations_pushed += snapshot.len() as u64;
        }
        info!(
            inserted = snapshot.inserted.len(),
            modified = snapshot.modified.len(),
            deleted = snapshot.deleted.len(),
            "transaction accepted"
        );

        self.load(session)?;

        Ok(SaveOutcome::Saved {
            inserted: snapshot.inserted.len(),
            modified: snapshot.modified.len(),
            deleted: snapshot.deleted.len(),
        })
    }

    fn record_error(&self, error: &SyncError) {
        *self.state.write() = SyncState::Error;
        self.stats.write().last_error = Some(error.to_string());
        warn!(%error, "sync operation failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use std::sync::mpsc;
    use std::sync::Arc;
    use zonesync_core::{Geometry, Position, Zone};

    fn config() -> WfsConfig {
        WfsConfig::new("https://wfs.example.com/wfs", "geoimage:zones")
    }

    fn point_zone(id: &str) -> Zone {
        Zone::new(id, Geometry::Point(Position::new(1.0, 2.0)))
    }

    fn client() -> SyncClient<MockTransport> {
        SyncClient::new(&config(), MockTransport::new()).unwrap()
    }

    #[test]
    fn invalid_feature_type_is_rejected() {
        let bad = WfsConfig::new("https://wfs.example.com/wfs", "zones");
        assert!(matches!(
            SyncClient::new(&bad, MockTransport::new()),
            Err(SyncError::Codec(_))
        ));
    }

    #[test]
    fn load_replaces_collection_and_resets_tracking() {
        let client = client();
        client.transport.set_features(vec![point_zone("z1")]);

        let mut session = ZoneSession::new();
        session.insert(point_zone("tmp1"));

        let count = client.load(&mut session).unwrap();
        assert_eq!(count, 1);
        assert_eq!(session.zones().len(), 1);
        assert_eq!(session.zones()[0].id, "z1");
        assert!(!session.is_dirty());
        assert_eq!(client.state(), SyncState::Synced);
        assert_eq!(client.stats().loads_completed, 1);
        assert_eq!(client.stats().zones_loaded, 1);
    }

    #[test]
    fn load_failure_leaves_session_untouched() {
        let client = client();
        client.transport.fail_fetch("connection refused");

        let mut session = ZoneSession::from_snapshot(vec![point_zone("z1")]);
        session.update(point_zone("z1"));

        assert!(client.load(&mut session).is_err());
        assert_eq!(session.zones().len(), 1);
        assert!(session.is_dirty());
        assert_eq!(client.state(), SyncState::Error);
        assert!(client.last_error().unwrap().contains("connection refused"));
    }

    #[test]
    fn save_with_no_changes_skips_network() {
        let client = client();
        let mut session = ZoneSession::new();

        let outcome = client.save(&mut session).unwrap();
        assert_eq!(outcome, SaveOutcome::NoChanges);
        assert!(client.transport.submitted_documents().is_empty());
        assert_eq!(client.transport.fetch_count(), 0);
    }

    #[test]
    fn save_success_clears_tracking_and_reloads() {
        let client = client();
        client.transport.set_features(vec![point_zone("srv1")]);

        let mut session = ZoneSession::new();
        session.insert(point_zone("tmp1"));

        let outcome = client.save(&mut session).unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Saved {
                inserted: 1,
                modified: 0,
                deleted: 0
            }
        );

        let documents = client.transport.submitted_documents();
        assert_eq!(documents.len(), 1);
        assert!(documents[0].contains("<wfs:Insert>"));

        // Re-baselined against the server snapshot.
        assert_eq!(client.transport.fetch_count(), 1);
        assert_eq!(session.zones().len(), 1);
        assert_eq!(session.zones()[0].id, "srv1");
        assert!(!session.is_dirty());
        assert_eq!(client.state(), SyncState::Synced);
        assert!(client.last_error().is_none());

        let stats = client.stats();
        assert_eq!(stats.saves_completed, 1);
        assert_eq!(stats.operations_pushed, 1);
    }

    #[test]
    fn save_failure_preserves_pending_changes() {
        let client = client();
        client.transport.set_submit_status(500);

        let mut session = ZoneSession::from_snapshot(vec![point_zone("z1")]);
        session.update(point_zone("z1"));
        session.insert(point_zone("tmp1"));
        let before = session.operation_summary();

        assert!(matches!(
            client.save(&mut session),
            Err(SyncError::TransactionRejected { status: 500, .. })
        ));

        assert_eq!(session.operation_summary(), before);
        assert_eq!(client.state(), SyncState::Error);
        assert!(client.last_error().unwrap().contains("500"));
        assert_eq!(client.transport.fetch_count(), 0);
    }

    #[test]
    fn failed_save_can_be_retried() {
        let client = client();
        client.transport.set_submit_status(503);

        let mut session = ZoneSession::new();
        session.insert(point_zone("tmp1"));

        assert!(client.save(&mut session).is_err());

        client.transport.set_submit_status(200);
        let outcome = client.save(&mut session).unwrap();
        assert!(matches!(outcome, SaveOutcome::Saved { inserted: 1, .. }));
        assert_eq!(client.transport.submitted_documents().len(), 2);
        assert!(client.last_error().is_none());
    }

    /// Transport whose submit blocks until released, to hold a save open.
    struct BlockingTransport {
        entered: mpsc::Sender<()>,
        release: std::sync::Mutex<mpsc::Receiver<()>>,
    }

    impl WfsTransport for BlockingTransport {
        fn fetch_features(&self) -> SyncResult<Vec<Zone>> {
            Ok(Vec::new())
        }

        fn submit_transaction(&self, _document: &str) -> SyncResult<()> {
            self.entered.send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
            Ok(())
        }
    }

    #[test]
    fn overlapping_save_fails_fast() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();

        let transport = BlockingTransport {
            entered: entered_tx,
            release: std::sync::Mutex::new(release_rx),
        };
        let client = Arc::new(SyncClient::new(&config(), transport).unwrap());

        let background = {
            let client = Arc::clone(&client);
            std::thread::spawn(move || {
                let mut session = ZoneSession::new();
                session.insert(point_zone("tmp1"));
                client.save(&mut session)
            })
        };

        // Wait until the first save is inside the submit call.
        entered_rx.recv().unwrap();

        let mut other = ZoneSession::new();
        other.insert(point_zone("tmp2"));
        assert!(matches!(
            client.save(&mut other),
            Err(SyncError::SaveInProgress)
        ));

        release_tx.send(()).unwrap();
        let outcome = background.join().unwrap().unwrap();
        assert!(matches!(outcome, SaveOutcome::Saved { inserted: 1, .. }));

        // Guard released: the second session can save now.
        release_tx.send(()).unwrap();
        let result = client.save(&mut other);
        entered_rx.recv().unwrap();
        assert!(matches!(result, Ok(SaveOutcome::Saved { .. })));
    }
}
