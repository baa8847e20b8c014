use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning a table definition into a struct.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The column's SQL type has no entry in the type mapping table.
    #[error("unsupported SQL type '{sql_type}' for column '{column}'")]
    UnsupportedType {
        /// Column whose type could not be mapped.
        column: String,
        /// The SQL type as it appeared in the input.
        sql_type: String,
    },

    /// Writing the rendered text failed.
    #[error("failed to render struct: {0}")]
    Render(#[from] std::fmt::Error),

    /// The DDL input could not be parsed.
    #[error("SQL parse error: {0}")]
    SchemaParse(String),

    /// The requested table is not defined in the input.
    #[error("table '{0}' not found in schema")]
    TableNotFound(String),

    /// The input contains no `CREATE TABLE` statement.
    #[error("no CREATE TABLE statements found")]
    NoTables,

    /// The schema defines several tables and no table was named.
    #[error("schema defines {0} tables; pick one with --table")]
    TableRequired(usize),

    /// The JSON column list could not be read.
    #[error("invalid column JSON: {0}")]
    ColumnsJson(#[source] serde_json::Error),

    /// The resolved fields could not be serialized as JSON.
    #[error("failed to serialize field manifest: {0}")]
    Manifest(#[source] serde_json::Error),

    /// Reading input or writing output failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path that was being read or written.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GenerateError>;
