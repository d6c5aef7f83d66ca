use crate::config::ResolvedConfig;
use crate::constants::{ALL_RECORDS_FILE_STEM, BLOOD_PRESSURE_FILE_STEM};
use crate::errors::{AppError, AppResult};
use crate::models::HealthRecord;
use crate::parser::{correlate_blood_pressure, partition_by_type};
use polars::prelude::*;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

// Timestamp rendering for CSV output
const CSV_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Builds `<output_dir>/<extension>/<stem>.<extension>`, creating the
/// format subdirectory on demand.
pub fn output_file_path(output_dir: &Path, stem: &str, extension: &str) -> AppResult<PathBuf> {
    let subdir = output_dir.join(extension);
    fs::create_dir_all(&subdir).map_err(|e| {
        AppError::IoError(format!("Failed to create output directory {subdir:?}: {e}"))
    })?;
    Ok(subdir.join(format!("{stem}.{extension}")))
}

/// Writes a table as CSV. An empty table still gets its header row.
pub fn write_table_csv(table: &mut DataFrame, path: &Path) -> AppResult<()> {
    let mut file = File::create(path)
        .map_err(|e| AppError::IoError(format!("Failed to create CSV file {path:?}: {e}")))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_datetime_format(Some(CSV_DATETIME_FORMAT.to_string()))
        .finish(table)
        .map_err(|e| AppError::TableError(format!("Failed to write CSV file {path:?}: {e}")))?;
    Ok(())
}

/// Writes the records as one pretty-printed JSON array.
pub fn write_records_json(records: &[HealthRecord], path: &Path) -> AppResult<()> {
    let file = File::create(path)
        .map_err(|e| AppError::IoError(format!("Failed to create JSON file {path:?}: {e}")))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .map_err(|e| AppError::IoError(format!("Failed to write JSON file {path:?}: {e}")))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes the records as JSON Lines, one object per line.
pub fn write_records_jsonl(records: &[HealthRecord], path: &Path) -> AppResult<()> {
    let file = File::create(path)
        .map_err(|e| AppError::IoError(format!("Failed to create JSONL file {path:?}: {e}")))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        let line = serde_json::to_string(record)
            .map_err(|e| AppError::IoError(format!("Failed to serialize record: {e}")))?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the raw records as `all_records.json` and `all_records.jsonl`.
pub fn write_json_files(records: &[HealthRecord], config: &ResolvedConfig) -> AppResult<()> {
    let json_path = output_file_path(&config.output_dir, ALL_RECORDS_FILE_STEM, "json")?;
    write_records_json(records, &json_path)?;
    info!(path = %json_path.display(), records = records.len(), "Wrote JSON records");

    let jsonl_path = output_file_path(&config.output_dir, ALL_RECORDS_FILE_STEM, "jsonl")?;
    write_records_jsonl(records, &jsonl_path)?;
    info!(path = %jsonl_path.display(), records = records.len(), "Wrote JSONL records");

    Ok(())
}

/// Writes the combined projected table as `all_records.csv`.
pub fn write_all_records_file(table: &DataFrame, config: &ResolvedConfig) -> AppResult<PathBuf> {
    let path = output_file_path(&config.output_dir, ALL_RECORDS_FILE_STEM, "csv")?;
    let mut table = table.clone();
    write_table_csv(&mut table, &path)?;
    info!(path = %path.display(), rows = table.height(), "Wrote combined records table");
    Ok(path)
}

/// Correlates and writes the blood pressure view as `blood_pressure.csv`.
/// A table without matching readings produces a header-only file.
pub fn write_blood_pressure_file(
    table: &DataFrame,
    config: &ResolvedConfig,
) -> AppResult<PathBuf> {
    let mut merged = correlate_blood_pressure(table, &config.vocabulary)?;
    let path = output_file_path(&config.output_dir, BLOOD_PRESSURE_FILE_STEM, "csv")?;
    write_table_csv(&mut merged, &path)?;
    info!(path = %path.display(), rows = merged.height(), "Wrote blood pressure table");
    Ok(path)
}

/// Writes one CSV per catalog type, named by normalized type name.
///
/// The two blood pressure identifiers are excluded; they are served by
/// the correlated view instead. Partitions are independent reads of the
/// completed table, so the fan-out runs in parallel.
pub fn write_per_type_files(
    table: &DataFrame,
    record_types: &[String],
    config: &ResolvedConfig,
) -> AppResult<Vec<PathBuf>> {
    let start = Instant::now();
    let vocabulary = &config.vocabulary;

    let paths: Vec<PathBuf> = record_types
        .par_iter()
        .filter(|type_identifier| !vocabulary.is_blood_pressure(type_identifier.as_str()))
        .map(|type_identifier| {
            let mut partition = partition_by_type(table, type_identifier, vocabulary)?;
            let stem = vocabulary.normalized_name(type_identifier);
            let path = output_file_path(&config.output_dir, &stem, "csv")?;
            write_table_csv(&mut partition, &path)?;
            info!(
                record_type = %type_identifier,
                path = %path.display(),
                rows = partition.height(),
                "Wrote per-type table"
            );
            Ok(path)
        })
        .collect::<AppResult<Vec<_>>>()?;

    let total_bytes: u64 = paths
        .iter()
        .filter_map(|path| fs::metadata(path).ok())
        .map(|metadata| metadata.len())
        .sum();

    info!(
        files = paths.len(),
        total_bytes,
        elapsed = ?start.elapsed(),
        "Per-type export completed"
    );

    Ok(paths)
}
