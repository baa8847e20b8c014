/// Identifier normalization helpers (Go field names, quoted and schema-qualified SQL names).
pub mod names;
/// Column and table metadata consumed by the generator.
pub mod schema;
/// `CREATE TABLE` parsing on top of `sqlparser`.
pub mod sql_parser;
