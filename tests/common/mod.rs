//! Common test utilities for integration tests

use std::fs;
use std::io::Write;
use std::path::Path;

/// Helper function to create a test XML file in a directory
#[allow(dead_code)]
pub fn create_test_xml_file(path: &Path, content: &str) {
    let parent = path.parent().unwrap();
    fs::create_dir_all(parent).unwrap();
    fs::File::create(path)
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();
}

/// Sample health export content for testing: four record types, one
/// blood pressure pair, a category-typed record, and escaped attribute
/// text
#[allow(dead_code)]
pub const SAMPLE_EXPORT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<HealthData locale="en_US">
 <ExportDate value="2024-03-01 08:00:00 +0100"/>
 <Record type="HKQuantityTypeIdentifierStepCount" creationDate="2024-01-01 10:00:00 +0100" startDate="2024-01-01 09:45:00 +0100" endDate="2024-01-01 10:00:00 +0100" value="512" unit="count" sourceName="Health &amp; Fitness" sourceVersion="17.0"/>
 <Record type="HKQuantityTypeIdentifierBloodPressureSystolic" creationDate="2024-01-01 10:00:00 +0100" startDate="2024-01-01 10:00:00 +0100" endDate="2024-01-01 10:00:00 +0100" value="120" unit="mmHg" device="Cuff" sourceName="Health" sourceVersion="1.0"/>
 <Record type="HKQuantityTypeIdentifierBloodPressureDiastolic" creationDate="2024-01-01 10:00:00 +0100" startDate="2024-01-01 10:00:00 +0100" endDate="2024-01-01 10:00:00 +0100" value="80" unit="mmHg" device="Cuff" sourceName="Health" sourceVersion="1.0"/>
 <Record type="HKCategoryTypeIdentifierSleepAnalysis" creationDate="2024-01-02 07:30:00 +0100" startDate="2024-01-01 23:00:00 +0100" endDate="2024-01-02 07:00:00 +0100" value="HKCategoryValueSleepAnalysisAsleep" sourceName="Watch"/>
 <Record type="HKQuantityTypeIdentifierStepCount" creationDate="2024-01-02 10:00:00 +0100" startDate="2024-01-02 09:45:00 +0100" endDate="2024-01-02 10:00:00 +0100" value="1024" unit="count" sourceName="Health &amp; Fitness" sourceVersion="17.0"/>
</HealthData>"#;

/// Export document without any Record elements
#[allow(dead_code)]
pub const EMPTY_EXPORT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<HealthData locale="en_US">
 <ExportDate value="2024-03-01 08:00:00 +0100"/>
</HealthData>"#;

/// Structurally broken document (mismatched end tag)
#[allow(dead_code)]
pub const MALFORMED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<HealthData>
 <Record type="HKQuantityTypeIdentifierStepCount" value="512"/>
</WrongClose>"#;
