//! CLI entry point for `table2struct`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{warn, LevelFilter};
use table2struct::error::{GenerateError, Result};
use table2struct::generator::field_manifest::{render_field_manifest, FieldManifest};
use table2struct::generator::struct_generator::{generate_struct, GeneratorConfig};
use table2struct::generator::type_mapping::NullableProfile;
use table2struct::output::formatter;
use table2struct::parser::names::{normalize_field_name, spell_leading_digit};
use table2struct::parser::schema::{load_columns_json, TableSchema};
use table2struct::parser::sql_parser::{self, SqlDialect};

#[derive(Parser)]
#[command(
    name = "table2struct",
    about = "Generate Go struct declarations from SQL table definitions"
)]
struct Cli {
    /// SQL file with CREATE TABLE statements (e.g. `SHOW CREATE TABLE` output)
    #[arg(required_unless_present = "columns", conflicts_with = "columns")]
    input: Option<PathBuf>,

    /// JSON column list to use instead of SQL input
    #[arg(long)]
    columns: Option<PathBuf>,

    /// Table to generate; optional when the SQL defines a single table
    #[arg(long)]
    table: Option<String>,

    /// Struct name (defaults to the table name as a Go identifier)
    #[arg(long = "struct")]
    struct_name: Option<String>,

    /// Go package name
    #[arg(long, default_value = "main")]
    package: String,

    /// Add json tags
    #[arg(long)]
    json: bool,

    /// Add gorm column tags and a TableName() method
    #[arg(long)]
    gorm: bool,

    /// Use guregu/null types for nullable columns instead of database/sql
    #[arg(long)]
    guregu: bool,

    /// Order fields alphabetically instead of by column position
    #[arg(long)]
    sort: bool,

    /// SQL dialect of the input file
    #[arg(long, default_value = "mysql")]
    dialect: SqlDialect,

    /// Output format
    #[arg(long, default_value = "go")]
    format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(long)]
    target: Option<PathBuf>,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Go,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Go => write!(f, "go"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "go" => Ok(OutputFormat::Go),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(2);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut table = load_table(cli)?;
    if table.columns.is_empty() {
        warn!("table '{}' has no columns", table.name);
    }
    if cli.sort {
        table.sort_columns_by_identifier();
    }

    let struct_name = cli
        .struct_name
        .clone()
        .unwrap_or_else(|| normalize_field_name(&spell_leading_digit(&table.name)));
    let profile = if cli.guregu {
        NullableProfile::Guregu
    } else {
        NullableProfile::Sql
    };
    let config = GeneratorConfig::new(&cli.package, struct_name)
        .with_json_tags(cli.json)
        .with_orm_tags(cli.gorm)
        .with_nullable_profile(profile);

    let generated = generate_struct(&table, &config)?;
    let contents = match cli.format {
        OutputFormat::Go => generated.source,
        OutputFormat::Json => {
            render_field_manifest(&FieldManifest::new(&table.name, &config, &generated.fields))?
        }
    };

    formatter::write_output(cli.target.as_deref(), &contents)
}

fn load_table(cli: &Cli) -> Result<TableSchema> {
    if let Some(path) = &cli.columns {
        let json = read_input(path)?;
        let name = cli.table.clone().unwrap_or_else(|| file_stem(path));
        return load_columns_json(&name, &json);
    }

    // clap guarantees one of the two inputs.
    let Some(path) = &cli.input else {
        return Err(GenerateError::NoTables);
    };
    let sql = read_input(path)?;
    let mut tables = sql_parser::parse_schema(&sql, cli.dialect)?;
    if tables.is_empty() {
        return Err(GenerateError::NoTables);
    }

    if let Some(name) = &cli.table {
        return sql_parser::find_table(&tables, name).cloned();
    }
    if tables.len() == 1 {
        return Ok(tables.remove(0));
    }
    Err(GenerateError::TableRequired(tables.len()))
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table")
        .to_string()
}
