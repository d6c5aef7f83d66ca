mod blood_pressure;
mod partition;
mod table_builder;
mod xml_parser;

// Re-export public API
pub use blood_pressure::correlate_blood_pressure;
pub use partition::partition_by_type;
pub use table_builder::{project, records_to_table};
pub use xml_parser::{parse_health_export, parse_health_export_bytes};
