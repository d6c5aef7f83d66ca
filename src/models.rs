use crate::constants::*;
use serde::{Deserialize, Serialize};

/// One "Record" element from the export, attribute values as written.
///
/// `type` is the only attribute every record must carry; the rest are
/// optional and become nulls in the record table. Absent attributes are
/// omitted from JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(rename = "creationDate", skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(rename = "sourceName", skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(rename = "sourceVersion", skip_serializing_if = "Option::is_none")]
    pub source_version: Option<String>,
}

/// The type-identifier vocabulary the algorithms are parameterized over:
/// vendor prefixes to strip, the category prefix whose types carry no
/// meaningful unit, and the two blood pressure identifiers.
///
/// Defaults come from [`crate::constants`]; a TOML config may substitute
/// another vocabulary without touching any algorithm.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Vocabulary {
    /// Prefixes stripped during normalization, most specific first
    pub type_prefixes: Vec<String>,
    /// Prefix marking category-typed (unit-less) records
    pub category_prefix: String,
    /// Type identifier of systolic blood pressure readings
    pub systolic_type: String,
    /// Type identifier of diastolic blood pressure readings
    pub diastolic_type: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            type_prefixes: TYPE_PREFIXES.iter().map(|p| p.to_string()).collect(),
            category_prefix: CATEGORY_TYPE_PREFIX.to_string(),
            systolic_type: SYSTOLIC_TYPE.to_string(),
            diastolic_type: DIASTOLIC_TYPE.to_string(),
        }
    }
}

impl Vocabulary {
    /// Returns the human-readable snake_case name for a type identifier.
    ///
    /// Strips at most one occurrence of each known prefix (every candidate
    /// is attempted, though only one is expected to match), then
    /// snake-cases the remainder. Total over any input: an unknown prefix
    /// is left in place and simply snake-cased along with the rest.
    pub fn normalized_name(&self, type_identifier: &str) -> String {
        let mut remainder = type_identifier;
        for prefix in &self.type_prefixes {
            remainder = remainder.strip_prefix(prefix.as_str()).unwrap_or(remainder);
        }
        to_snake_case(remainder)
    }

    /// Whether a raw type identifier belongs to the category kind.
    /// The check runs on the raw identifier, before any prefix stripping.
    pub fn is_category_type(&self, type_identifier: &str) -> bool {
        type_identifier.starts_with(&self.category_prefix)
    }

    /// Whether a raw type identifier is one of the two blood pressure types.
    pub fn is_blood_pressure(&self, type_identifier: &str) -> bool {
        type_identifier == self.systolic_type || type_identifier == self.diastolic_type
    }
}

/// Column projection applied to table outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// `type, creationDate, startDate, endDate, value, unit`
    Reduced,
    /// Reduced plus `device, sourceName, sourceVersion`
    Full,
}

impl Projection {
    /// Returns the ordered column list for this projection.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Reduced => REDUCED_COLUMNS,
            Self::Full => FULL_COLUMNS,
        }
    }

    /// Returns a human-readable name for the projection.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Reduced => "reduced",
            Self::Full => "full",
        }
    }
}

/// Converts a camel-case identifier remainder to snake_case.
///
/// An underscore is inserted before every uppercase letter, all letters
/// are lowercased, and leading underscores are trimmed from the result.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out.trim_start_matches('_').to_string()
}
