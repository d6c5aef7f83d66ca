use crate::constants::{DEFAULT_DATA_FILE, DEFAULT_OUTPUT_DIR};
use crate::errors::{AppError, AppResult};
use crate::models::Vocabulary;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved configuration with all values filled in (no Options).
///
/// This struct represents the run defaults and can be deserialized by the
/// TOML loader. All fields have concrete values, making it safe to access
/// directly without unwrapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Path of the XML export document
    pub data_file: PathBuf,
    /// Root directory for all output files
    pub output_dir: PathBuf,
    /// Type-identifier vocabulary driving normalization, the category
    /// check, and the blood pressure join
    pub vocabulary: Vocabulary,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            vocabulary: Vocabulary::default(),
        }
    }
}

/// Configuration that can be loaded from a TOML file.
///
/// Deserializes the action selection (which outputs to produce) and the
/// optional resolved settings. The parser rejects unknown keys to catch
/// typos, and validates that the file selects at least one action and
/// names two distinct blood pressure types.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolvedConfigFile {
    /// Print the numbered type listing instead of writing files
    #[serde(default)]
    pub print_types: bool,
    /// Write `all_records.json` and `all_records.jsonl`
    #[serde(default)]
    pub write_json: bool,
    /// Write the combined `all_records.csv`
    #[serde(default)]
    pub one_file: bool,
    /// Write one CSV per record type plus `blood_pressure.csv`
    #[serde(default)]
    pub separate_files: bool,
    /// Use the reduced column projection for table outputs
    #[serde(default)]
    pub reduce_output: bool,
    /// Flattened resolved configuration with run defaults
    #[serde(flatten)]
    pub resolved: ResolvedConfig,
}

impl ResolvedConfigFile {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed, unknown keys are
    /// present, no action is selected, or the systolic and diastolic type
    /// identifiers are identical (the join would pair readings with
    /// themselves).
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfigFile = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        if !(config.print_types || config.write_json || config.one_file || config.separate_files) {
            return Err(AppError::InvalidInput(
                "Config selects no actions: set at least one of print_types, write_json, one_file, separate_files".into(),
            ));
        }
        let vocabulary = &config.resolved.vocabulary;
        if vocabulary.systolic_type == vocabulary.diastolic_type {
            return Err(AppError::InvalidInput(
                "systolic_type and diastolic_type must differ".into(),
            ));
        }

        Ok(config)
    }
}
