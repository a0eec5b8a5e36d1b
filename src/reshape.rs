//! Wide-to-long reshape: one observation per (date, country, coordinate).

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::parser::WideTable;

/// A country's cumulative value at one coordinate on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub country: String,
    pub lat: f64,
    pub long: f64,
    pub value: u64,
}

/// Result of [`reshape`], plus how many source rows could not be keyed.
#[derive(Debug, Clone, Default)]
pub struct Reshaped {
    pub observations: Vec<Observation>,
    pub dropped_rows: usize,
}

// Coordinates are keyed by bit pattern; -0.0 is folded into 0.0 first.
type GroupKey = (NaiveDate, String, u64, u64);

fn coord_bits(v: f64) -> u64 {
    (v + 0.0).to_bits()
}

/// Melts the wide table and sums rows sharing (date, country, lat, long).
///
/// Subregions of a country that sit at the same coordinate collapse into
/// one observation. Rows without a latitude or longitude are dropped.
/// Output is sorted by date, then country, then latitude, then longitude.
#[tracing::instrument(skip(table), fields(rows = table.rows.len(), dates = table.dates.len()))]
pub fn reshape(table: &WideTable) -> Reshaped {
    let mut groups: HashMap<GroupKey, Observation> = HashMap::new();
    let mut dropped_rows = 0;

    for row in &table.rows {
        let (Some(lat), Some(long)) = (row.lat, row.long) else {
            dropped_rows += 1;
            continue;
        };

        for (date, value) in table.dates.iter().zip(&row.values) {
            let key = (*date, row.country.clone(), coord_bits(lat), coord_bits(long));
            groups
                .entry(key)
                .and_modify(|obs| obs.value += value)
                .or_insert_with(|| Observation {
                    date: *date,
                    country: row.country.clone(),
                    lat,
                    long,
                    value: *value,
                });
        }
    }

    if dropped_rows > 0 {
        warn!(dropped_rows, "Rows without coordinates were skipped");
    }

    let mut observations: Vec<Observation> = groups.into_values().collect();
    observations.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.country.cmp(&b.country))
            .then_with(|| a.lat.total_cmp(&b.lat))
            .then_with(|| a.long.total_cmp(&b.long))
    });

    debug!(observations = observations.len(), "Table reshaped");
    Reshaped {
        observations,
        dropped_rows,
    }
}

/// Global minimum and maximum value across all observations.
///
/// Returns `None` for an empty slice.
pub fn value_range(observations: &[Observation]) -> Option<(u64, u64)> {
    let min = observations.iter().map(|o| o.value).min()?;
    let max = observations.iter().map(|o| o.value).max()?;
    Some((min, max))
}
