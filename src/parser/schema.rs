use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::parser::names::{normalize_field_name, spell_leading_digit};

/// One column of a table, as reported by the schema source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name exactly as declared in the database.
    pub name: String,
    /// Whether the column accepts `NULL`.
    pub nullable: bool,
    /// Declared SQL type, e.g. `varchar(255)` or `BIGINT`.
    #[serde(alias = "type")]
    pub sql_type: String,
    /// Whether the column is (part of) the primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// Column comment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Column {
    /// Create a column with no primary-key flag and no comment.
    pub fn new(name: impl Into<String>, nullable: bool, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable,
            sql_type: sql_type.into(),
            primary_key: false,
            comment: None,
        }
    }
}

/// Ordered column list of a single table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name without schema qualification.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Create a table from its name and ordered columns.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Look up a column by its exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Reorder columns alphabetically by their generated Go identifier.
    ///
    /// The sort is stable, so columns that normalize to the same identifier
    /// keep their declaration order.
    pub fn sort_columns_by_identifier(&mut self) {
        self.columns
            .sort_by_cached_key(|c| normalize_field_name(&spell_leading_digit(&c.name)));
    }
}

/// Build a table from a JSON array of [`Column`] objects.
///
/// ```json
/// [{"name": "id", "nullable": false, "sql_type": "bigint", "primary_key": true}]
/// ```
pub fn load_columns_json(table_name: &str, json: &str) -> Result<TableSchema> {
    let columns: Vec<Column> = serde_json::from_str(json).map_err(GenerateError::ColumnsJson)?;
    Ok(TableSchema::new(table_name, columns))
}
