//! # ZoneSync Engine
//!
//! Load/save synchronization against a WFS-T feature server.
//!
//! This crate provides:
//! - `WfsConfig` for endpoint and feature type configuration
//! - `WfsTransport` abstraction with HTTP and mock implementations
//! - `SyncClient`, the load/save state machine
//!
//! ## Architecture
//!
//! The client operates on a caller-owned `ZoneSession`; it never holds
//! ambient session state. A save captures the pending change set at entry,
//! compiles one atomic transaction from that snapshot, and on success clears
//! exactly the snapshot's ids before re-baselining with a load.
//!
//! ## Key Invariants
//!
//! - The server snapshot is authoritative after every load
//! - A failed save leaves pending changes untouched and retryable
//! - At most one save is in flight at a time; overlapping attempts fail
//!   fast with `SyncError::SaveInProgress`
//! - An empty change set never reaches the network

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod http;
mod transport;

pub use client::{SaveOutcome, SyncClient, SyncState, SyncStats};
pub use config::WfsConfig;
pub use error::{SyncError, SyncResult};
pub use http::{HttpClient, HttpResponse, HttpWfsTransport, ReqwestClient};
pub use transport::{MockTransport, WfsTransport};
