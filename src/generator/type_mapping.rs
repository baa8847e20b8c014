use std::fmt;

use crate::error::{GenerateError, Result};

/// Convention used for nullable columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NullableProfile {
    /// `database/sql` wrappers (`sql.NullString`, `sql.NullInt64`, ...).
    #[default]
    Sql,
    /// `gopkg.in/guregu/null` wrappers (`null.String`, `null.Int`, ...).
    Guregu,
}

impl fmt::Display for NullableProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NullableProfile::Sql => write!(f, "sql"),
            NullableProfile::Guregu => write!(f, "guregu"),
        }
    }
}

impl std::str::FromStr for NullableProfile {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sql" => Ok(NullableProfile::Sql),
            "guregu" | "null" => Ok(NullableProfile::Guregu),
            _ => Err(format!("Invalid nullable profile: {s}")),
        }
    }
}

/// Groups of SQL types that share a Go representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlTypeFamily {
    /// Character and text types, plus `enum` and `json`.
    String,
    /// Raw byte types.
    Binary,
    /// Integers that fit a platform `int`.
    Int,
    /// `bigint`.
    BigInt,
    /// Single-precision `float`.
    Float,
    /// `double` and `decimal`.
    Double,
    /// Date and time types.
    Time,
}

impl SqlTypeFamily {
    /// Every family, in mapping-table order.
    pub const ALL: [SqlTypeFamily; 7] = [
        SqlTypeFamily::String,
        SqlTypeFamily::Binary,
        SqlTypeFamily::Int,
        SqlTypeFamily::BigInt,
        SqlTypeFamily::Float,
        SqlTypeFamily::Double,
        SqlTypeFamily::Time,
    ];

    /// SQL base type names that belong to this family.
    pub fn sql_types(self) -> &'static [&'static str] {
        match self {
            SqlTypeFamily::String => &[
                "char",
                "enum",
                "varchar",
                "longtext",
                "mediumtext",
                "text",
                "tinytext",
                "json",
            ],
            SqlTypeFamily::Binary => &["binary", "blob", "longblob", "mediumblob", "varbinary"],
            SqlTypeFamily::Int => &["tinyint", "smallint", "mediumint", "int"],
            SqlTypeFamily::BigInt => &["bigint"],
            SqlTypeFamily::Float => &["float"],
            SqlTypeFamily::Double => &["double", "decimal"],
            SqlTypeFamily::Time => &["date", "datetime", "time", "timestamp"],
        }
    }

    /// Classify a declared SQL type, ignoring case, length/precision
    /// parameters and trailing modifiers such as `unsigned`.
    pub fn from_sql_type(sql_type: &str) -> Option<Self> {
        let base = base_type_name(sql_type);
        Self::ALL
            .into_iter()
            .find(|family| family.sql_types().contains(&base.as_str()))
    }

    /// Go type for a column of this family.
    pub fn go_type(self, nullable: bool, profile: NullableProfile) -> &'static str {
        use NullableProfile::{Guregu, Sql};
        use SqlTypeFamily::*;

        match (self, nullable, profile) {
            (String, false, _) => "string",
            (String, true, Sql) => "sql.NullString",
            (String, true, Guregu) => "null.String",

            (Binary, _, _) => "[]byte",

            (Int, false, _) => "int",
            (BigInt, false, _) => "int64",
            (Int | BigInt, true, Sql) => "sql.NullInt64",
            (Int | BigInt, true, Guregu) => "null.Int",

            (Float, false, _) => "float32",
            (Double, false, _) => "float64",
            (Float | Double, true, Sql) => "sql.NullFloat64",
            (Float | Double, true, Guregu) => "null.Float",

            // database/sql has no nullable time wrapper in this convention.
            (Time, true, Guregu) => "null.Time",
            (Time, _, _) => "time.Time",
        }
    }
}

/// Lower-cased base name of a declared SQL type: `VARCHAR(255)` -> `varchar`,
/// `int(11) unsigned` -> `int`.
///
/// Synonyms are folded onto the names in the mapping table, so `INTEGER`,
/// `NUMERIC(10,2)` and `CHARACTER VARYING(20)` resolve like `int`, `decimal`
/// and `varchar`.
pub fn base_type_name(sql_type: &str) -> String {
    let lowered = sql_type.trim().to_ascii_lowercase();
    let mut words = lowered
        .split(|c: char| c == '(' || c.is_whitespace())
        .filter(|word| !word.is_empty());
    let first = words.next().unwrap_or_default();

    let base = match (first, words.next()) {
        ("character" | "char", Some("varying")) => "varchar",
        ("character", _) => "char",
        ("integer" | "int4", _) => "int",
        ("int2", _) => "smallint",
        ("int8", _) => "bigint",
        ("numeric" | "dec" | "fixed", _) => "decimal",
        ("real" | "float8", _) => "double",
        ("float4", _) => "float",
        ("bool" | "boolean", _) => "tinyint",
        ("bytea", _) => "blob",
        (other, _) => other,
    };
    base.to_string()
}

/// Resolve the Go type for a SQL column type.
///
/// Fails with [`GenerateError::UnsupportedType`] when the type is not in the
/// mapping table.
pub fn resolve_type(
    sql_type: &str,
    nullable: bool,
    profile: NullableProfile,
) -> Result<&'static str> {
    resolve_column_type("", sql_type, nullable, profile)
}

pub(crate) fn resolve_column_type(
    column: &str,
    sql_type: &str,
    nullable: bool,
    profile: NullableProfile,
) -> Result<&'static str> {
    SqlTypeFamily::from_sql_type(sql_type)
        .map(|family| family.go_type(nullable, profile))
        .ok_or_else(|| GenerateError::UnsupportedType {
            column: column.to_string(),
            sql_type: sql_type.to_string(),
        })
}
