//! Output formatting and persistence besides the HTML map.
//!
//! Supports pretty-printing, JSON summaries, the tier table as CSV and the
//! feature collection as a GeoJSON file.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use geojson::FeatureCollection;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

use crate::classify::TierTable;
use crate::pipeline::DatasetSummary;

/// Logs the run summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &DatasetSummary) {
    debug!("{:#?}", summary);
}

/// Logs the run summary as pretty-printed JSON.
pub fn print_json(summary: &DatasetSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Logs one line per ranked country.
pub fn log_tiers(tiers: &TierTable) {
    for c in tiers.ranked() {
        info!(
            rank = c.rank + 1,
            country = %c.country,
            total = c.total,
            tier = ?c.tier,
            color = c.tier.color(),
            "Country"
        );
    }
}

/// Writes the ranked tier table as CSV, replacing any existing file.
pub fn write_tier_csv(path: &Path, tiers: &TierTable) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;

    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);
    for row in tiers.ranked() {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = tiers.len(), "Tier table written");
    Ok(())
}

/// Writes the feature collection as a GeoJSON document.
pub fn write_geojson(path: &Path, collection: &FeatureCollection) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, collection.to_string())
        .with_context(|| format!("Failed to write GeoJSON: {:?}", path))?;

    info!(path = %path.display(), features = collection.features.len(), "GeoJSON written");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
