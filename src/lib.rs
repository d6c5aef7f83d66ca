//! hke-cli library
//!
//! This crate provides the core functionality for the `hke-cli` binary.
//! Keep the crate root minimal — implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The library is organized into modules that handle different aspects of the
//! health export conversion pipeline:
//!
//! - [`parser`] - Extracts records from the XML export, builds the record table,
//!   partitions it per type, and correlates blood pressure readings
//! - [`writer`] - Writes tables as CSV and raw records as JSON/JSON Lines
//! - [`cli`] - Command-line interface for orchestrating the conversion workflow
//! - [`config`] - TOML-file-driven run configuration
//! - [`models`] - Data structures for records, the type vocabulary, and projections
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! The typical workflow parses the export document, builds the table, applies a
//! projection, and hands the result to the writers:
//!
//! ```no_run
//! use hke_cli::errors::AppResult;
//! use hke_cli::models::Projection;
//! use hke_cli::parser::{parse_health_export, project, records_to_table};
//! use std::path::Path;
//!
//! # fn example() -> AppResult<()> {
//! let (records, record_types) = parse_health_export(Path::new("./data/Export.xml"))?;
//! println!("{} distinct record types", record_types.len());
//!
//! let table = records_to_table(records)?;
//! let reduced = project(&table, Projection::Reduced)?;
//! assert_eq!(reduced.width(), 6);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod parser;
pub mod writer;
