//! Compile command implementation: dry-run transaction compilation.

use crate::commands::EditScript;
use std::path::Path;
use zonesync_codec::{compile_transaction, FeatureType};
use zonesync_core::{Zone, ZoneSession};
use zonesync_engine::WfsConfig;

/// Runs the compile command.
///
/// The script's update features double as the local baseline so updates
/// apply without a server round trip.
pub fn run(input: &Path, config: &WfsConfig) -> Result<(), Box<dyn std::error::Error>> {
    let feature_type = FeatureType::parse(&config.feature_type, &config.namespace_uri)?;
    let script = EditScript::from_file(input)?;

    let baseline: Vec<Zone> = script
        .update
        .iter()
        .filter_map(Zone::from_feature)
        .collect();
    let mut session = ZoneSession::from_snapshot(baseline);
    script.apply(&mut session);

    match compile_transaction(&session.change_set(), &feature_type) {
        Some(document) => println!("{document}"),
        None => println!("no changes to save"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config() -> WfsConfig {
        WfsConfig::new("https://wfs.example.com/wfs", "geoimage:zones")
    }

    #[test]
    fn compiles_script_without_network() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "insert": [{"type": "Feature", "id": "tmp1",
                            "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
                            "properties": {"name": "Nouveau"}}],
                "delete": ["z9"]
            }"#,
        )
        .unwrap();

        run(file.path(), &config()).unwrap();
    }

    #[test]
    fn empty_script_is_no_changes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();
        run(file.path(), &config()).unwrap();
    }
}
