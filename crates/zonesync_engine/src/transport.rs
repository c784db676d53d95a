//! Transport layer abstraction for WFS operations.

use crate::error::{SyncError, SyncResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use zonesync_core::Zone;

/// A transport handles the two network operations of the sync protocol.
///
/// This trait abstracts the wire so the client can be driven by an HTTP
/// implementation in production and a mock in tests.
pub trait WfsTransport: Send + Sync {
    /// Fetches the authoritative feature snapshot.
    fn fetch_features(&self) -> SyncResult<Vec<Zone>>;

    /// Submits one transaction document. Success is a 2xx response; any
    /// other outcome is an error.
    fn submit_transaction(&self, document: &str) -> SyncResult<()>;
}

/// A mock transport for testing.
///
/// Records every submitted document and serves scripted fetch/submit
/// outcomes.
#[derive(Debug, Default)]
pub struct MockTransport {
    features: Mutex<Vec<Zone>>,
    fetch_error: Mutex<Option<String>>,
    submit_status: Mutex<u16>,
    submitted: Mutex<Vec<String>>,
    fetch_calls: AtomicUsize,
}

impl MockTransport {
    /// Creates a mock transport that fetches an empty collection and
    /// accepts every submit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            submit_status: Mutex::new(200),
            ..Self::default()
        }
    }

    /// Sets the features the next fetches return.
    pub fn set_features(&self, features: Vec<Zone>) {
        *self.features.lock().unwrap() = features;
    }

    /// Makes fetches fail with a transport error.
    pub fn fail_fetch(&self, message: impl Into<String>) {
        *self.fetch_error.lock().unwrap() = Some(message.into());
    }

    /// Clears a scripted fetch failure.
    pub fn recover_fetch(&self) {
        *self.fetch_error.lock().unwrap() = None;
    }

    /// Sets the HTTP status submits answer with.
    pub fn set_submit_status(&self, status: u16) {
        *self.submit_status.lock().unwrap() = status;
    }

    /// Returns every document submitted so far.
    #[must_use]
    pub fn submitted_documents(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }

    /// Returns the number of fetches performed.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl WfsTransport for MockTransport {
    fn fetch_features(&self) -> SyncResult<Vec<Zone>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fetch_error.lock().unwrap().clone() {
            return Err(SyncError::Transport(message));
        }
        Ok(self.features.lock().unwrap().clone())
    }

    fn submit_transaction(&self, document: &str) -> SyncResult<()> {
        self.submitted.lock().unwrap().push(document.to_string());
        let status = *self.submit_status.lock().unwrap();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(SyncError::TransactionRejected {
                status,
                body: String::new(),
            })
        }
    }
}
