//! Export backends behind one narrow capability.
//!
//! Both backends implement the same object-safe trait: verify the source
//! is reachable, enumerate tables, export one table to CSV, and dump a
//! schema artifact. The factory picks the backend for the host platform;
//! there is no fallback or retry across strategies.

use crate::{Result, models::Backend};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub mod helpers;
pub mod mdbtools;
#[cfg(windows)]
pub mod odbc;

pub use mdbtools::{ToolkitCommands, ToolkitExporter};
#[cfg(windows)]
pub use odbc::DriverExporter;

/// Main trait for export backends with object-safe design.
///
/// Implementations are stateless beyond their handle on the source
/// database; all artifact placement is decided by the caller.
#[async_trait]
pub trait Exporter: Send + Sync {
    /// Verifies the backend can service the database file.
    ///
    /// For the toolkit this checks that mdbtools is callable against the
    /// file; for the driver it checks the connection is alive. Failure is
    /// fatal to the run.
    async fn test_source(&self) -> Result<()>;

    /// Enumerates the tables present in the source database.
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// Exports one table to a CSV file at `dest`, overwriting any
    /// previous artifact, and returns the number of data rows written
    /// (header excluded).
    async fn export_table(&self, table: &str, dest: &Path) -> Result<u64>;

    /// Writes the backend's schema artifact into `output_dir` and
    /// returns its path.
    async fn dump_schema(&self, output_dir: &Path) -> Result<PathBuf>;

    /// Returns the backend this exporter implements.
    fn backend(&self) -> Backend;
}

/// Factory function for the platform's export backend.
///
/// Windows builds get the ODBC driver exporter (the Access driver only
/// exists there); every other platform gets the mdbtools exporter. The
/// driver connects eagerly, so an unreachable database fails here.
///
/// # Errors
/// Returns an error if the driver backend cannot establish its
/// connection. The toolkit backend constructs infallibly; its
/// availability is checked by [`Exporter::test_source`].
pub fn create_exporter(database: &Path) -> Result<Box<dyn Exporter>> {
    #[cfg(windows)]
    {
        let exporter = odbc::DriverExporter::connect(database)?;
        Ok(Box::new(exporter))
    }
    #[cfg(not(windows))]
    {
        Ok(Box::new(mdbtools::ToolkitExporter::new(database)))
    }
}
