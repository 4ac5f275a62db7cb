//! Data models for export results and the structured schema document.
//!
//! The schema document serializes with the field names the downstream
//! import tooling already consumes (`table`, `column`, `type`, `size`),
//! wrapped in a small metadata envelope.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The two export backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    /// External mdbtools command-line utilities (Unix-like hosts)
    Toolkit,
    /// Access ODBC driver (Windows hosts)
    Driver,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Toolkit => write!(f, "mdbtools"),
            Backend::Driver => write!(f, "ODBC"),
        }
    }
}

/// One column as reported by driver metadata introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    #[serde(rename = "column")]
    pub name: String,
    /// Declared type label as the driver reports it (e.g. `VARCHAR`, `COUNTER`)
    #[serde(rename = "type")]
    pub type_name: String,
    /// Declared size, where the driver reports one
    pub size: Option<u32>,
}

/// Column layout of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name
    pub table: String,
    /// Columns in ordinal order
    pub columns: Vec<ColumnDescriptor>,
}

/// Structured schema artifact produced by the driver backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Document format version
    pub format_version: String,
    /// File name of the source database
    pub database: String,
    /// When the document was generated
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Version of the tool that generated it
    pub generator_version: String,
    /// Per-table column layouts, in enumeration order
    pub tables: Vec<TableSchema>,
}

impl SchemaDocument {
    /// Creates an empty schema document for the given source database.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            format_version: "1.0".to_string(),
            database: database.into(),
            generated_at: chrono::Utc::now(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            tables: Vec::new(),
        }
    }

    /// Adds one table's layout to the document.
    pub fn add_table(&mut self, table: TableSchema) {
        self.tables.push(table);
    }
}

/// Outcome of exporting one configured table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportOutcome {
    /// CSV written successfully
    Exported {
        /// Data rows written, header excluded
        rows: u64,
    },
    /// Table is not present in the source database
    Missing,
    /// The export attempt failed; remaining tables still ran
    Failed {
        /// Why it failed
        reason: String,
    },
}

/// Per-table entry in an export report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableExport {
    /// Table name
    pub name: String,
    /// What happened to it
    pub outcome: ExportOutcome,
}

/// Summary of one extraction run, used to drive the console report.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    /// Backend that performed the run
    pub backend: Backend,
    /// Source database file
    pub database: PathBuf,
    /// Directory the artifacts were written to
    pub output_dir: PathBuf,
    /// Per-table outcomes, in export order
    pub tables: Vec<TableExport>,
    /// Path of the schema artifact
    pub schema_artifact: PathBuf,
    /// When the run started
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

impl ExportReport {
    /// Number of tables that produced a CSV file.
    pub fn exported_count(&self) -> usize {
        self.tables
            .iter()
            .filter(|t| matches!(t.outcome, ExportOutcome::Exported { .. }))
            .count()
    }

    /// Number of tables skipped because they were missing or failed.
    pub fn skipped_count(&self) -> usize {
        self.tables.len() - self.exported_count()
    }

    /// Total data rows written across all exported tables.
    pub fn total_rows(&self) -> u64 {
        self.tables
            .iter()
            .filter_map(|t| match t.outcome {
                ExportOutcome::Exported { rows } => Some(rows),
                _ => None,
            })
            .sum()
    }
}
