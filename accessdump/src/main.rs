//! Access database extraction tool.
//!
//! Extracts a fixed set of tables from a legacy Access database into
//! CSV files, plus one schema artifact, using mdbtools on Unix-like
//! hosts or the Access ODBC driver on Windows.

use accessdump::export;
use accessdump_core::config::{DEFAULT_DATABASE_PATH, DEFAULT_OUTPUT_DIR, ExportConfig};
use accessdump_core::error::ExportError;
use accessdump_core::init_logging;
use accessdump_core::models::ExportOutcome;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "accessdump")]
#[command(about = "Access database table extraction tool")]
#[command(version)]
#[command(long_about = "
Extracts the legacy doorcard tables from an Access database file into
CSV files plus a schema artifact.

BACKENDS:
- Unix-like hosts shell out to the mdbtools suite
  (mdb-ver, mdb-tables, mdb-export, mdb-schema)
- Windows hosts use the Microsoft Access ODBC driver

EXAMPLES:
  accessdump
  accessdump ./legacy/doorcard.accdb
  accessdump ./legacy/doorcard.accdb -o ./export
")]
struct Cli {
    /// Path to the Access database file
    #[arg(value_name = "DATABASE", default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    /// Directory the CSV files and schema artifact are written to
    #[arg(
        short,
        long,
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Output directory for CSV files and the schema artifact"
    )]
    output_dir: PathBuf,

    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all output except errors")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let config = ExportConfig::new(cli.database).with_output_dir(cli.output_dir);

    match export::run(&config).await {
        Ok(report) => {
            println!("Extraction complete");
            println!("Output: {}", report.output_dir.display());
            println!(
                "Tables exported: {} ({} rows)",
                report.exported_count(),
                report.total_rows()
            );
            if report.skipped_count() > 0 {
                println!("Tables skipped: {}", report.skipped_count());
                for table in &report.tables {
                    match &table.outcome {
                        ExportOutcome::Missing => {
                            println!("  {} - not found in database", table.name);
                        }
                        ExportOutcome::Failed { reason } => {
                            println!("  {} - {reason}", table.name);
                        }
                        ExportOutcome::Exported { .. } => {}
                    }
                }
            }
            println!("Schema: {}", report.schema_artifact.display());
        }
        Err(ExportError::MissingDatabase { path }) => {
            error!("Database file not found at {}", path.display());
            eprintln!();
            eprintln!("Usage: accessdump [DATABASE]");
            std::process::exit(1);
        }
        Err(e) => {
            error!("Extraction failed: {e}");
            std::process::exit(1);
        }
    }
}
