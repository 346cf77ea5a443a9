//! Error types for sqlsketch.

use thiserror::Error;

/// The main error type for sqlsketch operations.
///
/// Query execution itself never fails — an unrecognized query degrades to an
/// empty result. Errors here cover the fallible edges: loading a schema,
/// reading configuration, writing output.
#[derive(Debug, Error)]
pub enum SketchError {
    /// Failed to parse a schema definition.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A relationship references a table that is not in the registry.
    #[error("Unknown table '{0}' referenced by schema")]
    UnknownTable(String),

    /// A relationship or sample row references a column the table lacks.
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// A sample row value does not match its column's declared type.
    #[error("Type mismatch in table '{table}', column '{column}': {detail}")]
    TypeMismatch {
        table: String,
        column: String,
        detail: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SketchError {
    /// Create an unknown-column error.
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create a type-mismatch error.
    pub fn type_mismatch(
        table: impl Into<String>,
        column: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            table: table.into(),
            column: column.into(),
            detail: detail.into(),
        }
    }
}

/// Result type alias for sqlsketch operations.
pub type SketchResult<T> = Result<T, SketchError>;
