/// Writes generated source to a file or stdout.
pub mod formatter;
