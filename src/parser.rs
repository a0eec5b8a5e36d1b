//! CSV parser for the wide per-date case table.
//!
//! The header holds four identifier columns followed by one column per
//! observed date (`M/D/YY`). Each data row is one location.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::TableError;

pub const COL_PROVINCE: &str = "Province/State";
pub const COL_COUNTRY: &str = "Country/Region";
pub const COL_LAT: &str = "Lat";
pub const COL_LONG: &str = "Long";

/// Format of every date column header.
pub const DATE_HEADER_FORMAT: &str = "%m/%d/%y";

/// One source row: a location and its cumulative value for each date column.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub province: Option<String>,
    pub country: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    /// Parallel to [`WideTable::dates`].
    pub values: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<RawRecord>,
}

struct ColumnLayout {
    province: usize,
    country: usize,
    lat: usize,
    long: usize,
    /// `(column index, header text)` for every date column, in header order.
    dates: Vec<(usize, String)>,
}

/// Decodes the raw CSV bytes into a [`WideTable`].
///
/// # Errors
///
/// Fails if an identifier column is missing, any other header is not a
/// `%m/%d/%y` date, or a value/coordinate cell is not numeric.
pub fn parse_wide_table(bytes: &[u8]) -> Result<WideTable, TableError> {
    let mut rdr = ReaderBuilder::new().from_reader(bytes);
    let headers = rdr.headers()?.clone();

    let layout = locate_columns(&headers)?;
    let dates = layout
        .dates
        .iter()
        .map(|(_, header)| parse_date_header(header))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let record = result?;
        // Row numbers in messages count the header as line 1.
        let row = row_idx + 2;

        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let province = Some(cell(layout.province))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let mut values = Vec::with_capacity(layout.dates.len());
        for (idx, header) in &layout.dates {
            values.push(parse_value(cell(*idx), row, header)?);
        }

        rows.push(RawRecord {
            province,
            country: cell(layout.country).to_string(),
            lat: parse_coordinate(cell(layout.lat), row, COL_LAT)?,
            long: parse_coordinate(cell(layout.long), row, COL_LONG)?,
            values,
        });
    }

    debug!(rows = rows.len(), dates = dates.len(), "Wide table parsed");
    Ok(WideTable { dates, rows })
}

/// Parses a date column header strictly as `M/D/YY`.
pub fn parse_date_header(header: &str) -> Result<NaiveDate, TableError> {
    NaiveDate::parse_from_str(header.trim(), DATE_HEADER_FORMAT).map_err(|source| {
        TableError::InvalidDateHeader {
            header: header.to_string(),
            source,
        }
    })
}

fn locate_columns(headers: &csv::StringRecord) -> Result<ColumnLayout, TableError> {
    let find = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(TableError::MissingColumn(name))
    };

    let province = find(COL_PROVINCE)?;
    let country = find(COL_COUNTRY)?;
    let lat = find(COL_LAT)?;
    let long = find(COL_LONG)?;
    let ids = [province, country, lat, long];

    let dates = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !ids.contains(i))
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    Ok(ColumnLayout {
        province,
        country,
        lat,
        long,
        dates,
    })
}

// Empty cells count as zero so they drop out of sums.
fn parse_value(cell: &str, row: usize, column: &str) -> Result<u64, TableError> {
    if cell.is_empty() {
        return Ok(0);
    }
    cell.parse().map_err(|_| TableError::InvalidValue {
        row,
        column: column.to_string(),
        value: cell.to_string(),
    })
}

fn parse_coordinate(cell: &str, row: usize, column: &'static str) -> Result<Option<f64>, TableError> {
    if cell.is_empty() {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(TableError::InvalidCoordinate {
            row,
            column,
            value: cell.to_string(),
        }),
    }
}
