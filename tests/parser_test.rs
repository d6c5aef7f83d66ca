//! Integration tests for parser module

#[path = "common/mod.rs"]
mod common;

use common::*;
use hke_cli::models::{Projection, Vocabulary};
use hke_cli::parser;
use polars::prelude::*;
use tempfile::TempDir;

fn millis(text: &str) -> i64 {
    chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

#[test]
fn test_parse_and_build_table_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let xml_path = temp_dir.path().join("data/Export.xml");
    create_test_xml_file(&xml_path, SAMPLE_EXPORT_XML);

    let (records, record_types) = parser::parse_health_export(&xml_path).unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(
        record_types,
        vec![
            "HKQuantityTypeIdentifierStepCount".to_string(),
            "HKQuantityTypeIdentifierBloodPressureSystolic".to_string(),
            "HKQuantityTypeIdentifierBloodPressureDiastolic".to_string(),
            "HKCategoryTypeIdentifierSleepAnalysis".to_string(),
        ]
    );
    assert_eq!(records[0].source_name, Some("Health & Fitness".to_string()));

    let table = parser::records_to_table(records).unwrap();
    assert_eq!(table.height(), 5);
    assert_eq!(table.width(), 9);

    // +0100 offsets are converted to the canonical instant, not stripped
    let creation = table.column("creationDate").unwrap().datetime().unwrap();
    assert_eq!(creation.get(0), Some(millis("2024-01-01T09:00:00")));
}

#[test]
fn test_partition_per_catalog_type() {
    let temp_dir = TempDir::new().unwrap();
    let xml_path = temp_dir.path().join("data/Export.xml");
    create_test_xml_file(&xml_path, SAMPLE_EXPORT_XML);

    let (records, _) = parser::parse_health_export(&xml_path).unwrap();
    let table = parser::records_to_table(records).unwrap();
    let vocabulary = Vocabulary::default();

    let steps = parser::partition_by_type(
        &table,
        "HKQuantityTypeIdentifierStepCount",
        &vocabulary,
    )
    .unwrap();
    assert_eq!(steps.height(), 2);
    assert!(!steps.get_column_names().contains(&"type"));
    assert!(steps.get_column_names().contains(&"unit"));

    // Category-typed partitions additionally lose the unit column
    let sleep = parser::partition_by_type(
        &table,
        "HKCategoryTypeIdentifierSleepAnalysis",
        &vocabulary,
    )
    .unwrap();
    assert_eq!(sleep.height(), 1);
    assert!(!sleep.get_column_names().contains(&"type"));
    assert!(!sleep.get_column_names().contains(&"unit"));

    // A type absent from the document is a valid empty partition
    let absent = parser::partition_by_type(
        &table,
        "HKQuantityTypeIdentifierBodyMass",
        &vocabulary,
    )
    .unwrap();
    assert_eq!(absent.height(), 0);
}

#[test]
fn test_blood_pressure_correlation_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let xml_path = temp_dir.path().join("data/Export.xml");
    create_test_xml_file(&xml_path, SAMPLE_EXPORT_XML);

    let (records, _) = parser::parse_health_export(&xml_path).unwrap();
    let table = parser::records_to_table(records).unwrap();
    let reduced = parser::project(&table, Projection::Reduced).unwrap();

    let merged = parser::correlate_blood_pressure(&reduced, &Vocabulary::default()).unwrap();
    assert_eq!(merged.height(), 1);
    assert_eq!(
        merged.column("valueSystolic").unwrap().get(0).unwrap(),
        AnyValue::String("120")
    );
    assert_eq!(
        merged.column("valueDiastolic").unwrap().get(0).unwrap(),
        AnyValue::String("80")
    );
}

#[test]
fn test_projection_reduced_is_column_subset() {
    let temp_dir = TempDir::new().unwrap();
    let xml_path = temp_dir.path().join("data/Export.xml");
    create_test_xml_file(&xml_path, SAMPLE_EXPORT_XML);

    let (records, _) = parser::parse_health_export(&xml_path).unwrap();
    let table = parser::records_to_table(records).unwrap();

    let full = parser::project(&table, Projection::Full).unwrap();
    let reduced = parser::project(&table, Projection::Reduced).unwrap();

    assert_eq!(full.width(), 9);
    assert_eq!(reduced.width(), 6);
    for column in reduced.get_column_names() {
        assert!(full.get_column_names().contains(&column));
    }
}

#[test]
fn test_empty_export_yields_empty_table() {
    let temp_dir = TempDir::new().unwrap();
    let xml_path = temp_dir.path().join("data/Export.xml");
    create_test_xml_file(&xml_path, EMPTY_EXPORT_XML);

    let (records, record_types) = parser::parse_health_export(&xml_path).unwrap();
    assert!(records.is_empty());
    assert!(record_types.is_empty());

    let table = parser::records_to_table(records).unwrap();
    assert_eq!(table.height(), 0);
    assert_eq!(table.width(), 9);
}

#[test]
fn test_malformed_export_aborts() {
    let temp_dir = TempDir::new().unwrap();
    let xml_path = temp_dir.path().join("data/Export.xml");
    create_test_xml_file(&xml_path, MALFORMED_XML);

    assert!(parser::parse_health_export(&xml_path).is_err());
}

#[test]
fn test_unparsable_timestamp_aborts_table_build() {
    let temp_dir = TempDir::new().unwrap();
    let xml_path = temp_dir.path().join("data/Export.xml");
    create_test_xml_file(
        &xml_path,
        r#"<?xml version="1.0"?>
<HealthData>
 <Record type="HKQuantityTypeIdentifierStepCount" creationDate="sometime in January" value="512"/>
</HealthData>"#,
    );

    let (records, _) = parser::parse_health_export(&xml_path).unwrap();
    assert!(parser::records_to_table(records).is_err());
}
