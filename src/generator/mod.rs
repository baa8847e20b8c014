/// JSON manifest of the resolved fields.
pub mod field_manifest;
/// Column resolution and Go struct rendering.
pub mod struct_generator;
/// SQL type to Go type mapping table.
pub mod type_mapping;
