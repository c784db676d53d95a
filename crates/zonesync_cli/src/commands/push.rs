//! Push command implementation.

use crate::commands::EditScript;
use std::path::Path;
use zonesync_core::ZoneSession;
use zonesync_engine::{SaveOutcome, SyncClient, WfsTransport};

/// Runs the push command: load, apply the edit script, save.
pub fn run<T: WfsTransport>(
    client: &SyncClient<T>,
    input: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let script = EditScript::from_file(input)?;

    let mut session = ZoneSession::new();
    client.load(&mut session)?;
    script.apply(&mut session);

    match client.save(&mut session)? {
        SaveOutcome::NoChanges => println!("no changes to save"),
        SaveOutcome::Saved {
            inserted,
            modified,
            deleted,
        } => {
            println!("saved: {inserted} inserted, {modified} modified, {deleted} deleted");
            println!("collection now holds {} zone(s)", session.zones().len());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zonesync_core::{Geometry, Position, Zone};
    use zonesync_engine::{MockTransport, WfsConfig};

    #[test]
    fn push_submits_one_transaction() {
        let config = WfsConfig::new("https://wfs.example.com/wfs", "geoimage:zones");
        let transport = MockTransport::new();
        transport.set_features(vec![Zone::new(
            "z1",
            Geometry::Point(Position::new(0.0, 0.0)),
        )]);
        let client = SyncClient::new(&config, transport).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"delete": ["z1"]}"#).unwrap();

        run(&client, file.path()).unwrap();

        let documents = client.transport().submitted_documents();
        assert_eq!(documents.len(), 1);
        assert!(documents[0].contains("<wfs:Delete"));
        assert!(documents[0].contains("fid=\"z1\""));
    }

    #[test]
    fn push_with_empty_script_skips_network() {
        let config = WfsConfig::new("https://wfs.example.com/wfs", "geoimage:zones");
        let client = SyncClient::new(&config, MockTransport::new()).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();

        run(&client, file.path()).unwrap();
        assert!(client.transport().submitted_documents().is_empty());
    }
}
