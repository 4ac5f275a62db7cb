//! The extraction workflow.
//!
//! Strictly linear: verify the input exists, build the platform
//! exporter, verify the backend is available, create the output
//! directory, enumerate tables, export each configured table, dump the
//! schema artifact. Per-table failures are recorded and skipped; the
//! fatal set is the missing input file, an unavailable backend, and a
//! failed schema dump.

use accessdump_core::config::ExportConfig;
use accessdump_core::error::{ExportError, Result};
use accessdump_core::exporters::{Exporter, create_exporter};
use accessdump_core::models::{ExportOutcome, ExportReport, TableExport};
use tracing::{error, info, warn};

/// Runs one extraction against the configured database.
///
/// # Errors
/// Returns an error before any filesystem effect if the input file does
/// not exist, and propagates the fatal backend errors from
/// [`export_database`].
pub async fn run(config: &ExportConfig) -> Result<ExportReport> {
    if !config.database.exists() {
        return Err(ExportError::MissingDatabase {
            path: config.database.clone(),
        });
    }

    info!("Database: {}", config.database.display());
    info!("Output directory: {}", config.output_dir.display());

    let exporter = create_exporter(&config.database).map_err(|e| {
        error!("Failed to create exporter: {e}");
        e
    })?;
    info!("Using {} backend", exporter.backend());

    export_database(exporter.as_ref(), config).await
}

/// Exports every configured table plus the schema artifact through the
/// given backend.
///
/// Tables absent from the source enumeration are recorded as missing;
/// tables whose export fails are recorded with the failure reason. Both
/// are non-fatal and the remaining tables still run.
pub async fn export_database(
    exporter: &dyn Exporter,
    config: &ExportConfig,
) -> Result<ExportReport> {
    let started_at = chrono::Utc::now();
    let start = std::time::Instant::now();

    exporter.test_source().await.map_err(|e| {
        error!("Source check failed: {e}");
        e
    })?;

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| {
            ExportError::io(
                format!(
                    "failed to create output directory {}",
                    config.output_dir.display()
                ),
                e,
            )
        })?;

    let available = exporter.list_tables().await?;
    info!("Found {} tables in database", available.len());

    let mut tables = Vec::with_capacity(config.tables.len());
    for name in &config.tables {
        if !available.iter().any(|t| t == name) {
            warn!("Table {name} not found in database");
            tables.push(TableExport {
                name: name.clone(),
                outcome: ExportOutcome::Missing,
            });
            continue;
        }

        info!("Exporting {name}...");
        let dest = config.output_dir.join(format!("{name}.csv"));
        match exporter.export_table(name, &dest).await {
            Ok(rows) => {
                info!("Exported {rows} rows from {name}");
                tables.push(TableExport {
                    name: name.clone(),
                    outcome: ExportOutcome::Exported { rows },
                });
            }
            Err(e) => {
                warn!("Failed to export {name}: {e}");
                tables.push(TableExport {
                    name: name.clone(),
                    outcome: ExportOutcome::Failed {
                        reason: e.to_string(),
                    },
                });
            }
        }
    }

    info!("Exporting schema...");
    let schema_artifact = exporter.dump_schema(&config.output_dir).await?;
    info!("Schema exported to {}", schema_artifact.display());

    Ok(ExportReport {
        backend: exporter.backend(),
        database: config.database.clone(),
        output_dir: config.output_dir.clone(),
        tables,
        schema_artifact,
        started_at,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
