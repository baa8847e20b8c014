use serde::Serialize;

use crate::error::{GenerateError, Result};
use crate::generator::struct_generator::{GeneratorConfig, ResolvedField};

/// JSON description of a generated struct, for tooling that wants the field
/// mapping without parsing Go source.
#[derive(Debug, Clone, Serialize)]
pub struct FieldManifest<'a> {
    /// Source table.
    pub table: &'a str,
    /// Go package name.
    pub package: &'a str,
    /// Go struct name.
    #[serde(rename = "struct")]
    pub struct_name: &'a str,
    /// Nullable wrapper convention used for the types.
    pub nullable_profile: String,
    /// Resolved fields in output order.
    pub fields: &'a [ResolvedField],
}

impl<'a> FieldManifest<'a> {
    /// Describe `fields` as generated for `table` with `config`.
    pub fn new(table: &'a str, config: &'a GeneratorConfig, fields: &'a [ResolvedField]) -> Self {
        Self {
            table,
            package: &config.package_name,
            struct_name: &config.struct_name,
            nullable_profile: config.nullable_profile.to_string(),
            fields,
        }
    }
}

/// Render the manifest as pretty-printed JSON with a trailing newline.
pub fn render_field_manifest(manifest: &FieldManifest<'_>) -> Result<String> {
    let mut json = serde_json::to_string_pretty(manifest).map_err(GenerateError::Manifest)?;
    json.push('\n');
    Ok(json)
}
