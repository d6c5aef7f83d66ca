use crate::errors::{AppError, AppResult};
use crate::models::{HealthRecord, Projection};
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;

// Offset-less fallbacks; such values are taken as already canonical.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses one textual timestamp into a timezone-naive instant.
///
/// Values carrying an offset (the export's native
/// `2024-01-01 10:00:00 +0100` form, or RFC 3339) are converted to UTC
/// before the offset is discarded, so equivalent instants written in
/// different offsets parse equal.
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S %z") {
        return Some(parsed.naive_utc());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_utc());
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    None
}

/// Parses a whole timestamp column, keeping nulls as nulls.
fn parse_date_column(
    column: &str,
    values: Vec<Option<String>>,
) -> AppResult<Vec<Option<NaiveDateTime>>> {
    values
        .into_iter()
        .map(|value| match value {
            Some(text) => parse_timestamp(&text)
                .map(Some)
                .ok_or_else(|| AppError::FormatError {
                    column: column.to_string(),
                    value: text,
                }),
            None => Ok(None),
        })
        .collect()
}

/// Assembles extracted records into the record table.
///
/// The schema is fixed to the nine-attribute vocabulary in output order;
/// the three date columns are parsed to timezone-naive instants at
/// millisecond precision and the rest stay text. An unparsable timestamp
/// aborts the whole build (partial tables are not a supported output).
/// An empty record list yields an empty table with the same schema.
pub fn records_to_table(records: Vec<HealthRecord>) -> AppResult<DataFrame> {
    let len = records.len();
    // Pre-allocate vectors with known capacity
    let mut types = Vec::with_capacity(len);
    let mut creation_dates = Vec::with_capacity(len);
    let mut start_dates = Vec::with_capacity(len);
    let mut end_dates = Vec::with_capacity(len);
    let mut values = Vec::with_capacity(len);
    let mut units = Vec::with_capacity(len);
    let mut devices = Vec::with_capacity(len);
    let mut source_names = Vec::with_capacity(len);
    let mut source_versions = Vec::with_capacity(len);

    // Move fields out of each record instead of cloning
    for record in records {
        types.push(record.record_type);
        creation_dates.push(record.creation_date);
        start_dates.push(record.start_date);
        end_dates.push(record.end_date);
        values.push(record.value);
        units.push(record.unit);
        devices.push(record.device);
        source_names.push(record.source_name);
        source_versions.push(record.source_version);
    }

    let creation_dates = parse_date_column("creationDate", creation_dates)?;
    let start_dates = parse_date_column("startDate", start_dates)?;
    let end_dates = parse_date_column("endDate", end_dates)?;

    DataFrame::new(vec![
        Series::new("type", types),
        DatetimeChunked::from_naive_datetime_options(
            "creationDate",
            creation_dates,
            TimeUnit::Milliseconds,
        )
        .into_series(),
        DatetimeChunked::from_naive_datetime_options(
            "startDate",
            start_dates,
            TimeUnit::Milliseconds,
        )
        .into_series(),
        DatetimeChunked::from_naive_datetime_options("endDate", end_dates, TimeUnit::Milliseconds)
            .into_series(),
        Series::new("value", values),
        Series::new("unit", units),
        Series::new("device", devices),
        Series::new("sourceName", source_names),
        Series::new("sourceVersion", source_versions),
    ])
    .map_err(|e| AppError::TableError(format!("Failed to create record table: {e}")))
}

/// Returns a new table restricted to the projection's ordered columns.
pub fn project(table: &DataFrame, projection: Projection) -> AppResult<DataFrame> {
    let projected = table.select(projection.columns().iter().copied())?;
    Ok(projected)
}
