use std::fmt;

use log::debug;
use sqlparser::ast::{ColumnDef, ColumnOption, CreateTable, Statement, TableConstraint};
use sqlparser::dialect::{Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect};
use sqlparser::parser::Parser;

use crate::error::{GenerateError, Result};
use crate::parser::names::{normalize_identifier, relation_name};
use crate::parser::schema::{Column, TableSchema};

/// SQL dialect used to parse DDL input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SqlDialect {
    /// MySQL / MariaDB (`SHOW CREATE TABLE` output).
    #[default]
    MySql,
    /// PostgreSQL.
    PostgreSql,
    /// ANSI-ish generic dialect.
    Generic,
}

impl SqlDialect {
    fn dialect(self) -> Box<dyn Dialect> {
        match self {
            SqlDialect::MySql => Box::new(MySqlDialect {}),
            SqlDialect::PostgreSql => Box::new(PostgreSqlDialect {}),
            SqlDialect::Generic => Box::new(GenericDialect {}),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlDialect::MySql => write!(f, "mysql"),
            SqlDialect::PostgreSql => write!(f, "postgres"),
            SqlDialect::Generic => write!(f, "generic"),
        }
    }
}

impl std::str::FromStr for SqlDialect {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(SqlDialect::MySql),
            "postgres" | "postgresql" => Ok(SqlDialect::PostgreSql),
            "generic" => Ok(SqlDialect::Generic),
            _ => Err(format!("Invalid SQL dialect: {s}")),
        }
    }
}

/// Parse SQL DDL and collect every `CREATE TABLE` statement.
///
/// Statements other than `CREATE TABLE` are skipped. Columns are nullable
/// unless declared `NOT NULL` or part of the primary key.
pub fn parse_schema(sql: &str, dialect: SqlDialect) -> Result<Vec<TableSchema>> {
    let statements = Parser::parse_sql(dialect.dialect().as_ref(), sql)
        .map_err(|e| GenerateError::SchemaParse(e.to_string()))?;

    let tables: Vec<TableSchema> = statements
        .iter()
        .filter_map(|statement| match statement {
            Statement::CreateTable(create) => Some(table_from_create(create)),
            _ => None,
        })
        .collect();

    debug!(
        "parsed {} statements, {} tables ({dialect})",
        statements.len(),
        tables.len()
    );
    Ok(tables)
}

/// Find a table by name, ignoring case, quotes and schema qualification.
pub fn find_table<'a>(tables: &'a [TableSchema], name: &str) -> Result<&'a TableSchema> {
    let wanted = normalize_identifier(&relation_name(name));
    tables
        .iter()
        .find(|t| normalize_identifier(&t.name) == wanted)
        .ok_or_else(|| GenerateError::TableNotFound(name.to_string()))
}

fn table_from_create(create: &CreateTable) -> TableSchema {
    let primary_key: Vec<String> = create
        .constraints
        .iter()
        .filter_map(|constraint| match constraint {
            TableConstraint::PrimaryKey { columns, .. } => Some(columns),
            _ => None,
        })
        .flatten()
        .map(|ident| normalize_identifier(&ident.value))
        .collect();

    let columns = create
        .columns
        .iter()
        .map(|def| {
            let mut column = column_from_def(def);
            if primary_key.contains(&normalize_identifier(&column.name)) {
                column.primary_key = true;
                column.nullable = false;
            }
            column
        })
        .collect();

    TableSchema::new(relation_name(&create.name.to_string()), columns)
}

fn column_from_def(def: &ColumnDef) -> Column {
    let mut column = Column::new(def.name.value.clone(), true, def.data_type.to_string());

    for option in &def.options {
        match &option.option {
            ColumnOption::NotNull => column.nullable = false,
            ColumnOption::Null => column.nullable = true,
            ColumnOption::Unique {
                is_primary: true, ..
            } => {
                column.primary_key = true;
                column.nullable = false;
            }
            ColumnOption::Comment(comment) => column.comment = Some(comment.clone()),
            _ => {}
        }
    }

    column
}
