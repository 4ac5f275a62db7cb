//! Core types and exporter backends for accessdump.
//!
//! accessdump extracts a fixed set of tables from a Microsoft Access
//! database into CSV files, plus one schema artifact. This crate holds
//! everything the binary builds on: run configuration, error types,
//! logging setup, result models, and the two platform backends behind
//! the [`exporters::Exporter`] trait — mdbtools subprocesses on
//! Unix-like hosts, the Access ODBC driver on Windows.
//!
//! Exported table content is passed through from the source unmodified;
//! the only local interpretation is CSV parsing for row accounting.

pub mod config;
pub mod error;
pub mod exporters;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::ExportConfig;
pub use error::{ExportError, Result};
pub use exporters::{Exporter, create_exporter};
pub use logging::init_logging;
pub use models::{
    Backend, ColumnDescriptor, ExportOutcome, ExportReport, SchemaDocument, TableExport,
    TableSchema,
};
