use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::load_catalog;
use crate::config::{load_config, GeneratorConfig, OutputMode};
use crate::generator::{generate_script, Generator};
use crate::report::print_diagnostics;
use crate::sink::CountingSink;

/// Command-line interface for sprocgen
///
/// Generates CRUD stored procedures from a catalog snapshot and provides
/// catalog introspection for troubleshooting a run.
#[derive(Parser)]
#[command(name = "sprocgen")]
#[command(about = "Generate CRUD stored procedures from catalog metadata", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for sprocgen
#[derive(Subcommand)]
pub enum Commands {
    /// Generate the five CRUD procedures for every in-scope table
    Generate {
        /// Path to the catalog snapshot file (YAML or JSON)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Path to a sprocgen.toml config file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Schema qualifying the generated procedure names
        #[arg(long)]
        schema: Option<String>,

        /// Restrict generation to these tables (comma-separated or repeated)
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        tables: Option<Vec<String>>,

        /// Table-name prefix to strip from procedure names (e.g. tbl_)
        #[arg(long)]
        strip_prefix: Option<String>,

        /// Computed column the Select procedures search over
        #[arg(long)]
        search_column: Option<String>,

        /// Use SELECT * instead of an explicit column list
        #[arg(long, default_value_t = false)]
        wildcard: bool,

        /// Default page size baked into Select procedures
        #[arg(long)]
        page_size: Option<u32>,

        /// Write the generated script to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Submit procedures one at a time instead of buffering a script
        #[arg(long, default_value_t = false)]
        execute: bool,
    },
    /// Summarize a catalog snapshot: tables, key shapes, generation blockers
    Inspect {
        /// Path to the catalog snapshot file (YAML or JSON)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Computed column treated as the search surface
        #[arg(long)]
        search_column: Option<String>,
    },
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The catalog snapshot cannot be loaded or parsed
/// - The config file cannot be loaded or parsed
/// - The output file cannot be written
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            catalog,
            config,
            schema,
            tables,
            strip_prefix,
            search_column,
            wildcard,
            page_size,
            output,
            execute,
        } => {
            let base = match config {
                Some(path) => load_config(&path)?,
                None => GeneratorConfig::default(),
            };
            let config = apply_overrides(
                base,
                schema,
                tables,
                strip_prefix,
                search_column,
                wildcard,
                page_size,
                execute,
            );
            let snapshot = load_catalog(&catalog)?;

            match config.output {
                OutputMode::Execute => {
                    // No execution capability is wired into the CLI; submit
                    // to a counting sink and report what would have run.
                    let mut sink = CountingSink::default();
                    let report = Generator::new(&config).run(&snapshot, &mut sink)?;
                    print_diagnostics(&report.diagnostics);
                    println!(
                        "✅ Submitted {} procedures for {} tables ({} skipped)",
                        sink.submitted,
                        report.tables,
                        report.diagnostics.len()
                    );
                }
                OutputMode::Buffer => {
                    let report = generate_script(&snapshot, &config)?;
                    print_diagnostics(&report.diagnostics);
                    let script = report.script.unwrap_or_default();
                    match output {
                        Some(path) => {
                            std::fs::write(&path, script)?;
                            println!("✅ Wrote script for {} tables → {path:?}", report.tables);
                        }
                        None => print!("{script}"),
                    }
                }
            }
            Ok(())
        }
        Commands::Inspect {
            catalog,
            search_column,
        } => {
            let search_column =
                search_column.unwrap_or_else(|| GeneratorConfig::default().search_column);
            let snapshot = load_catalog(&catalog)?;
            for table in snapshot.tables() {
                let key = snapshot.primary_key(table);
                let shape = match key.columns.len() {
                    0 => "no primary key ⚠️".to_string(),
                    1 => format!("single key [{}]", key.columns[0].name),
                    n => format!("composite key ({n} columns)"),
                };
                println!(
                    "{table}: {} columns, {shape}, id={}, search={}",
                    snapshot.column_count(table),
                    snapshot.has_id_column(table),
                    snapshot.has_computed_column(table, &search_column),
                );
            }
            Ok(())
        }
    }
}

/// Overlay CLI flags onto the config-file values.
#[allow(clippy::too_many_arguments)]
pub(crate) fn apply_overrides(
    mut config: GeneratorConfig,
    schema: Option<String>,
    tables: Option<Vec<String>>,
    strip_prefix: Option<String>,
    search_column: Option<String>,
    wildcard: bool,
    page_size: Option<u32>,
    execute: bool,
) -> GeneratorConfig {
    if let Some(schema) = schema {
        config.schema = schema;
    }
    if let Some(tables) = tables {
        config.tables = tables;
    }
    if let Some(prefix) = strip_prefix {
        config.strip_prefix = prefix;
    }
    if let Some(column) = search_column {
        config.search_column = column;
    }
    if wildcard {
        config.wildcard_select = true;
    }
    if let Some(size) = page_size {
        config.page_size = size;
    }
    if execute {
        config.output = OutputMode::Execute;
    }
    config
}
