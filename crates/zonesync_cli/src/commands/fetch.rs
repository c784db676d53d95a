//! Fetch command implementation.

use serde_json::json;
use zonesync_core::ZoneSession;
use zonesync_engine::{SyncClient, WfsTransport};

/// Runs the fetch command.
pub fn run<T: WfsTransport>(
    client: &SyncClient<T>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ZoneSession::new();
    let count = client.load(&mut session)?;

    match format {
        "json" => {
            let collection = json!({
                "type": "FeatureCollection",
                "features": session.zones().iter().map(|z| z.to_feature()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&collection)?);
        }
        _ => {
            println!("{count} zone(s)");
            for zone in session.zones() {
                println!(
                    "  {}  {}  [{}]",
                    zone.id,
                    zone.property("name").unwrap_or("-"),
                    zone.geometry.kind()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonesync_core::{Geometry, Position, Zone};
    use zonesync_engine::{MockTransport, WfsConfig};

    #[test]
    fn fetch_runs_against_mock() {
        let config = WfsConfig::new("https://wfs.example.com/wfs", "geoimage:zones");
        let transport = MockTransport::new();
        transport.set_features(vec![Zone::new(
            "z1",
            Geometry::Point(Position::new(1.0, 2.0)),
        )]);

        let client = SyncClient::new(&config, transport).unwrap();
        run(&client, "text").unwrap();
        run(&client, "json").unwrap();
    }
}
