use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MorphDB - runtime-defined tables over SQLite
#[derive(Parser, Debug)]
#[command(name = "morphdb")]
#[command(author = "MorphDB Team")]
#[command(version)]
#[command(about = "Create tables, evolve their fields and read/write rows at runtime", long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults are used when the file is absent)
    #[arg(short = 'c', long = "config", default_value = "config.toml")]
    pub config: PathBuf,

    /// Database file (overrides [storage].database_path)
    #[arg(short = 'd', long = "database")]
    pub database: Option<String>,

    /// Log level (overrides [logging].level)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,

    /// Log to console in addition to the log file
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and catalog relations
    Init,

    /// List every table in the catalog
    Tables,

    /// Create a table from `name:type` field declarations
    CreateTable {
        /// Display name of the table
        #[arg(short = 'n', long = "name")]
        name: Option<String>,

        /// Field declaration, repeatable (e.g. `--field age:int`)
        #[arg(short = 'f', long = "field", value_parser = parse_field_decl)]
        fields: Vec<(String, String)>,
    },

    /// Add fields to an existing table; names already present are skipped
    AddFields {
        table_id: i64,

        #[arg(short = 'f', long = "field", value_parser = parse_field_decl, required = true)]
        fields: Vec<(String, String)>,
    },

    /// Show a table's metadata and fields
    Describe { table_id: i64 },

    /// Insert one row given as a JSON object
    Insert {
        table_id: i64,

        /// Row values, e.g. '{"name": "x", "age": 42}'
        #[arg(short = 'j', long = "json")]
        json: String,
    },

    /// Print every row of a table as JSON lines
    Rows { table_id: i64 },

    /// Compare catalog fields against physical columns
    Reconcile {
        /// Only this table (all tables when omitted)
        table_id: Option<i64>,
    },
}

/// Parse `name:type` into its two halves.
pub fn parse_field_decl(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((name, ty)) if !name.is_empty() && !ty.is_empty() => {
            Ok((name.to_string(), ty.trim().to_string()))
        }
        _ => Err(format!("expected NAME:TYPE, got '{}'", s)),
    }
}
