//! The acquire, reshape, classify and render stages wired together.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::classify::{RadiusScale, TierTable, classify};
use crate::config::PipelineConfig;
use crate::features::{MapPoint, build_points, distinct_times, to_feature_collection};
use crate::fetch::{HttpClient, acquire};
use crate::parser::parse_wide_table;
use crate::render::{render_html, write_html};
use crate::reshape::{Observation, reshape, value_range};

/// Counts describing one run, logged at the end and printable as JSON.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub raw_rows: usize,
    pub dropped_rows: usize,
    pub observations: usize,
    pub countries: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub min_value: u64,
    pub max_value: u64,
    pub features: usize,
}

/// Everything derived from the raw table, ready to render or export.
#[derive(Debug, Clone)]
pub struct MapData {
    pub observations: Vec<Observation>,
    pub tiers: TierTable,
    pub scale: RadiusScale,
    pub points: Vec<MapPoint>,
    pub summary: DatasetSummary,
}

/// Runs parse, reshape, classify and feature construction over raw bytes.
#[tracing::instrument(skip_all, fields(bytes = bytes.len()))]
pub fn prepare(bytes: &[u8], config: &PipelineConfig) -> Result<MapData> {
    let table = parse_wide_table(bytes)?;
    let reshaped = reshape(&table);
    let observations = reshaped.observations;

    let tiers = classify(&observations);

    let (min_value, max_value) = value_range(&observations).unwrap_or((0, 0));
    let scale = RadiusScale::new(min_value as f64, max_value as f64, config.radius);

    let points = build_points(&observations, &tiers, &scale);

    let summary = DatasetSummary {
        raw_rows: table.rows.len(),
        dropped_rows: reshaped.dropped_rows,
        observations: observations.len(),
        countries: tiers.len(),
        first_date: observations.first().map(|o| o.date),
        last_date: observations.last().map(|o| o.date),
        min_value,
        max_value,
        features: points.len(),
    };

    Ok(MapData {
        observations,
        tiers,
        scale,
        points,
        summary,
    })
}

impl MapData {
    pub fn to_html(&self, config: &PipelineConfig) -> Result<String> {
        render_html(
            &to_feature_collection(&self.points),
            &distinct_times(&self.points),
            &config.view,
            &config.timeline,
        )
    }
}

/// Fetches (or reads the cache), prepares and writes the HTML map.
#[tracing::instrument(skip_all, fields(output = %config.output_path.display()))]
pub fn run<C: HttpClient>(client: &C, config: &PipelineConfig) -> Result<DatasetSummary> {
    let bytes = acquire(client, config)?;
    let data = prepare(&bytes, config)?;

    let html = data.to_html(config)?;
    write_html(&config.output_path, &html)?;

    let s = &data.summary;
    info!(
        countries = s.countries,
        observations = s.observations,
        features = s.features,
        first_date = ?s.first_date,
        last_date = ?s.last_date,
        "Map rendered"
    );

    Ok(data.summary)
}
