#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use table2struct::generator::struct_generator::{generate_struct, GeneratorConfig};
use table2struct::parser::schema::{Column, TableSchema};
use table2struct::parser::sql_parser::{self, SqlDialect};

pub(crate) fn fixture_path(fixture: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(fixture)
}

pub(crate) fn read_fixture_sql(fixture: &str) -> String {
    std::fs::read_to_string(fixture_path(fixture)).expect("fixture SQL should be readable")
}

pub(crate) fn load_fixture_table(fixture: &str, table: &str) -> TableSchema {
    let tables = sql_parser::parse_schema(&read_fixture_sql(fixture), SqlDialect::MySql)
        .expect("fixture SQL should parse");
    sql_parser::find_table(&tables, table)
        .expect("fixture table should exist")
        .clone()
}

/// Build a `test_table` from `(name, nullable, sql_type)` triples.
pub(crate) fn test_table(columns: &[(&str, bool, &str)]) -> TableSchema {
    TableSchema::new(
        "test_table",
        columns
            .iter()
            .map(|(name, nullable, sql_type)| Column::new(*name, *nullable, *sql_type))
            .collect(),
    )
}

/// Config matching the `package test` / `testStruct` fixtures.
pub(crate) fn test_config() -> GeneratorConfig {
    GeneratorConfig::new("test", "testStruct")
}

pub(crate) fn generate(table: &TableSchema, config: &GeneratorConfig) -> String {
    generate_struct(table, config)
        .expect("generation should succeed")
        .source
}

/// Expected `testStruct` source with one tab-indented line per field.
pub(crate) fn expected_struct(field_lines: &[&str]) -> String {
    let mut out = String::from("package test\n\ntype testStruct struct {\n");
    for line in field_lines {
        out.push('\t');
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

pub(crate) fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}_{nanos}"));
    std::fs::create_dir_all(&dir).expect("should create temp dir");
    dir
}
