//! Generate Go struct declarations from SQL table definitions.
#![warn(missing_docs)]

/// Error type shared by every stage.
pub mod error;
/// Go struct generation: type mapping, field resolution, rendering.
pub mod generator;
/// Writing generated files.
pub mod output;
/// Schema input and identifier normalization.
pub mod parser;

pub use error::{GenerateError, Result};
