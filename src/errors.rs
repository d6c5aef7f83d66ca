use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Failed to parse the XML export document
    ParseError(String),
    /// A timestamp column held a value that could not be parsed
    FormatError { column: String, value: String },
    /// A tabular operation (schema, filter, join, serialization) failed
    TableError(String),
    /// Invalid input format or configuration
    InvalidInput(String),
    /// IO operation failed
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            AppError::FormatError { column, value } => {
                write!(
                    f,
                    "Format error: column '{column}' has unparsable value '{value}'"
                )
            }
            AppError::TableError(msg) => write!(f, "Table error: {msg}"),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            AppError::IoError(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

// Conversion implementations for common errors
impl From<quick_xml::Error> for AppError {
    fn from(err: quick_xml::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<polars::prelude::PolarsError> for AppError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        AppError::TableError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
