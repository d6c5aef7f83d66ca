// Default locations
pub const DEFAULT_DATA_FILE: &str = "./data/Export.xml";
pub const DEFAULT_OUTPUT_DIR: &str = "./out";

// Vendor type-identifier prefixes, most specific first.
// The normalizer strips at most one occurrence of each.
pub const QUANTITY_TYPE_PREFIX: &str = "HKQuantityTypeIdentifier";
pub const CATEGORY_TYPE_PREFIX: &str = "HKCategoryTypeIdentifier";
pub const DATA_TYPE_PREFIX: &str = "HKDataType";
pub const TYPE_PREFIXES: &[&str] = &[QUANTITY_TYPE_PREFIX, CATEGORY_TYPE_PREFIX, DATA_TYPE_PREFIX];

// Distinguished blood pressure type identifiers
pub const SYSTOLIC_TYPE: &str = "HKQuantityTypeIdentifierBloodPressureSystolic";
pub const DIASTOLIC_TYPE: &str = "HKQuantityTypeIdentifierBloodPressureDiastolic";

// Record table schema. Column order here is the output column order.
pub const FULL_COLUMNS: &[&str] = &[
    "type",
    "creationDate",
    "startDate",
    "endDate",
    "value",
    "unit",
    "device",
    "sourceName",
    "sourceVersion",
];
pub const REDUCED_COLUMNS: &[&str] = &[
    "type",
    "creationDate",
    "startDate",
    "endDate",
    "value",
    "unit",
];

// Output file stems
pub const ALL_RECORDS_FILE_STEM: &str = "all_records";
pub const BLOOD_PRESSURE_FILE_STEM: &str = "blood_pressure";
