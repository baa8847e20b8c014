use std::fmt::Write;

use log::{debug, info};
use serde::Serialize;

use crate::error::Result;
use crate::generator::type_mapping::{resolve_column_type, NullableProfile};
use crate::parser::names::{normalize_field_name, spell_leading_digit};
use crate::parser::schema::{Column, TableSchema};

/// Which annotations the generated struct carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Add `json:"<column>"` tags.
    pub json_tags: bool,
    /// Add `gorm:"column:<column>"` tags and a `TableName()` method.
    pub orm_tags: bool,
}

impl RenderOptions {
    /// True when field lines carry a struct tag.
    pub fn tags_enabled(&self) -> bool {
        self.json_tags || self.orm_tags
    }
}

/// Settings for generating one struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Go package name written in the header.
    pub package_name: String,
    /// Name of the generated struct type.
    pub struct_name: String,
    /// Wrapper convention for nullable columns.
    pub nullable_profile: NullableProfile,
    /// Tag and method annotations.
    pub options: RenderOptions,
}

impl GeneratorConfig {
    /// Config with the `database/sql` profile and no tags.
    pub fn new(package_name: impl Into<String>, struct_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            struct_name: struct_name.into(),
            nullable_profile: NullableProfile::default(),
            options: RenderOptions::default(),
        }
    }

    /// Enable or disable `json` tags.
    pub fn with_json_tags(mut self, enabled: bool) -> Self {
        self.options.json_tags = enabled;
        self
    }

    /// Enable or disable `gorm` tags and the `TableName()` method.
    pub fn with_orm_tags(mut self, enabled: bool) -> Self {
        self.options.orm_tags = enabled;
        self
    }

    /// Select the nullable wrapper convention.
    pub fn with_nullable_profile(mut self, profile: NullableProfile) -> Self {
        self.nullable_profile = profile;
        self
    }
}

/// A column turned into a Go struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    /// Original column name.
    pub column: String,
    /// Go field name.
    pub identifier: String,
    /// Go type.
    pub type_name: String,
    /// Struct tag body, without the surrounding backticks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Column comment, folded onto one line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Output of [`generate_struct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStruct {
    /// Complete Go source file.
    pub source: String,
    /// Fields in output order.
    pub fields: Vec<ResolvedField>,
}

/// Resolve a single column into a struct field.
pub fn resolve_field(column: &Column, config: &GeneratorConfig) -> Result<ResolvedField> {
    let type_name = resolve_column_type(
        &column.name,
        &column.sql_type,
        column.nullable,
        config.nullable_profile,
    )?;
    let field = ResolvedField {
        column: column.name.clone(),
        identifier: normalize_field_name(&spell_leading_digit(&column.name)),
        type_name: type_name.to_string(),
        tag: build_tag(column, &config.options),
        comment: column.comment.as_deref().map(fold_comment),
    };
    debug!(
        "column '{}' ({}, nullable={}) -> {} {}",
        column.name, column.sql_type, column.nullable, field.identifier, field.type_name
    );
    Ok(field)
}

/// Resolve every column, keeping their order. The first unsupported column
/// aborts the whole table.
pub fn resolve_fields(columns: &[Column], config: &GeneratorConfig) -> Result<Vec<ResolvedField>> {
    columns
        .iter()
        .map(|column| resolve_field(column, config))
        .collect()
}

/// Generate the Go source for a table.
pub fn generate_struct(table: &TableSchema, config: &GeneratorConfig) -> Result<GeneratedStruct> {
    let fields = resolve_fields(&table.columns, config)?;
    let source = render_struct(
        &fields,
        &config.package_name,
        &config.struct_name,
        &table.name,
        &config.options,
    )?;
    info!(
        "generated struct {} for table '{}' ({} fields)",
        config.struct_name,
        table.name,
        fields.len()
    );
    Ok(GeneratedStruct { source, fields })
}

/// Render resolved fields as a gofmt-formatted Go file.
///
/// Field names, types and tags are each padded to the widest entry of their
/// column. Fields are written in the order given.
pub fn render_struct(
    fields: &[ResolvedField],
    package_name: &str,
    struct_name: &str,
    table_name: &str,
    options: &RenderOptions,
) -> Result<String> {
    let name_width = column_width(fields.iter().map(|f| f.identifier.as_str()));
    let type_width = column_width(fields.iter().map(|f| f.type_name.as_str()));

    let tags: Vec<String> = if options.tags_enabled() {
        fields
            .iter()
            .map(|f| format!("`{}`", f.tag.as_deref().unwrap_or(EMPTY_COMMENT_TAG)))
            .collect()
    } else {
        Vec::new()
    };
    let tag_width = column_width(tags.iter().map(String::as_str));

    let mut out = String::new();
    writeln!(out, "package {package_name}")?;
    writeln!(out)?;
    writeln!(out, "type {struct_name} struct {{")?;

    for (idx, field) in fields.iter().enumerate() {
        let name = &field.identifier;
        let ty = &field.type_name;
        match tags.get(idx) {
            Some(tag) => {
                write!(
                    out,
                    "\t{name:<name_width$} {ty:<type_width$} {tag:<tag_width$} //"
                )?;
                if let Some(comment) = field.comment.as_deref().filter(|c| !c.is_empty()) {
                    write!(out, " {comment}")?;
                }
                writeln!(out)?;
            }
            None => writeln!(out, "\t{name:<name_width$} {ty}")?,
        }
    }
    writeln!(out, "}}")?;

    if options.orm_tags {
        writeln!(out)?;
        writeln!(
            out,
            "// TableName sets the insert table name for this struct type"
        )?;
        writeln!(out, "func (t *{struct_name}) TableName() string {{")?;
        writeln!(out, "\treturn {}", go_string_literal(table_name))?;
        writeln!(out, "}}")?;
    }

    Ok(out)
}

const EMPTY_COMMENT_TAG: &str = "comment:\"\"";

fn build_tag(column: &Column, options: &RenderOptions) -> Option<String> {
    if !options.tags_enabled() {
        return None;
    }

    let mut parts = Vec::with_capacity(3);
    if options.orm_tags {
        let primary = if column.primary_key { ";primary_key" } else { "" };
        let value = format!("column:{}{primary}", column.name);
        parts.push(format!("gorm:{}", go_string_literal(&value)));
    }
    if options.json_tags {
        parts.push(format!("json:{}", go_string_literal(&column.name)));
    }
    parts.push(EMPTY_COMMENT_TAG.to_string());
    Some(parts.join(" "))
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|cell| cell.chars().count()).max().unwrap_or(0)
}

fn fold_comment(comment: &str) -> String {
    comment
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// Backticks are escaped as well, so the literal can sit inside a raw-string
// struct tag.
fn go_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for ch in value.chars() {
        match ch {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            '`' => literal.push_str("\\x60"),
            _ => literal.push(ch),
        }
    }
    literal.push('"');
    literal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(identifier: &str, type_name: &str) -> ResolvedField {
        ResolvedField {
            column: identifier.to_string(),
            identifier: identifier.to_string(),
            type_name: type_name.to_string(),
            tag: None,
            comment: None,
        }
    }

    #[test]
    fn render_struct_aligns_untagged_fields() {
        let fields = [field("ID", "int64"), field("DisplayName", "sql.NullString")];
        let out = render_struct(&fields, "models", "User", "users", &RenderOptions::default())
            .expect("render should succeed");

        assert_eq!(
            out,
            "package models\n\ntype User struct {\n\tID          int64\n\tDisplayName sql.NullString\n}\n"
        );
    }

    #[test]
    fn render_struct_keeps_caller_order() {
        let fields = [field("Zeta", "int"), field("Alpha", "int")];
        let out = render_struct(&fields, "p", "S", "t", &RenderOptions::default()).unwrap();
        let zeta = out.find("Zeta").unwrap();
        let alpha = out.find("Alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn render_struct_handles_empty_tables() {
        let out = render_struct(&[], "p", "Empty", "empty", &RenderOptions::default()).unwrap();
        assert_eq!(out, "package p\n\ntype Empty struct {\n}\n");
    }

    #[test]
    fn render_struct_appends_comments_after_marker() {
        let mut commented = field("Total", "float64");
        commented.tag = Some("json:\"total\" comment:\"\"".to_string());
        commented.comment = Some("order total".to_string());
        let mut plain = field("ID", "int");
        plain.tag = Some("json:\"id\" comment:\"\"".to_string());

        let options = RenderOptions {
            json_tags: true,
            orm_tags: false,
        };
        let out = render_struct(&[commented, plain], "p", "Order", "orders", &options).unwrap();

        assert!(out.contains("\tTotal float64 `json:\"total\" comment:\"\"` // order total\n"));
        assert!(out.contains("\tID    int     `json:\"id\" comment:\"\"`    //\n"));
    }

    #[test]
    fn render_struct_escapes_table_name_literal() {
        let options = RenderOptions {
            json_tags: false,
            orm_tags: true,
        };
        let out = render_struct(&[], "p", "S", "we\"ird", &options).unwrap();
        assert!(out.contains("\treturn \"we\\\"ird\"\n"));
    }

    #[test]
    fn resolve_field_builds_tags_in_gorm_json_order() {
        let mut column = Column::new("user_id", false, "bigint");
        column.primary_key = true;
        column.comment = Some("owner\n  of the row".to_string());

        let config = GeneratorConfig::new("p", "S")
            .with_json_tags(true)
            .with_orm_tags(true);
        let resolved = resolve_field(&column, &config).expect("bigint is supported");

        assert_eq!(resolved.identifier, "UserID");
        assert_eq!(resolved.type_name, "int64");
        assert_eq!(
            resolved.tag.as_deref(),
            Some("gorm:\"column:user_id;primary_key\" json:\"user_id\" comment:\"\"")
        );
        assert_eq!(resolved.comment.as_deref(), Some("owner of the row"));
    }

    #[test]
    fn resolve_field_escapes_quotes_in_identifier_and_tag() {
        let column = Column::new("a`b\"c", false, "int");
        let config = GeneratorConfig::new("p", "S")
            .with_json_tags(true)
            .with_orm_tags(true);
        let resolved = resolve_field(&column, &config).expect("int is supported");

        assert_eq!(resolved.identifier, "ABC");
        assert_eq!(
            resolved.tag.as_deref(),
            Some(r#"gorm:"column:a\x60b\"c" json:"a\x60b\"c" comment:"""#)
        );

        let out = render_struct(&[resolved], "p", "S", "t", &config.options).unwrap();
        let field_line = out.lines().nth(3).expect("field line");
        assert_eq!(field_line.matches('`').count(), 2, "{field_line}");
    }

    #[test]
    fn resolve_field_spells_out_leading_digits() {
        let column = Column::new("1stringColumn", false, "varchar");
        let resolved = resolve_field(&column, &GeneratorConfig::new("p", "S")).unwrap();
        assert_eq!(resolved.identifier, "OneStringColumn");
        assert_eq!(resolved.tag, None);
    }

    #[test]
    fn resolve_fields_is_all_or_nothing() {
        let columns = [
            Column::new("id", false, "int"),
            Column::new("shape", false, "geometry"),
        ];
        let err = resolve_fields(&columns, &GeneratorConfig::new("p", "S"))
            .expect_err("geometry is not mapped");
        assert_eq!(
            err.to_string(),
            "unsupported SQL type 'geometry' for column 'shape'"
        );
    }
}
