//! Toolkit-backed exporter shelling out to the mdbtools suite.
//!
//! Table data and the schema dump are passed through from the external
//! commands unmodified; the only local processing is the CSV parse used
//! for row accounting.

use super::{Exporter, helpers};
use crate::Result;
use crate::config::SCHEMA_TEXT_FILENAME;
use crate::error::ExportError;
use crate::models::Backend;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Program names (or paths) of the four mdbtools commands this backend
/// invokes. Tests substitute stub executables here.
#[derive(Debug, Clone)]
pub struct ToolkitCommands {
    /// Prints the Jet version of a database file
    pub ver: PathBuf,
    /// Lists table names
    pub tables: PathBuf,
    /// Exports one table as CSV on stdout
    pub export: PathBuf,
    /// Dumps a textual schema description
    pub schema: PathBuf,
}

impl Default for ToolkitCommands {
    fn default() -> Self {
        Self {
            ver: PathBuf::from("mdb-ver"),
            tables: PathBuf::from("mdb-tables"),
            export: PathBuf::from("mdb-export"),
            schema: PathBuf::from("mdb-schema"),
        }
    }
}

/// Export backend built on the external mdbtools utilities.
#[derive(Debug)]
pub struct ToolkitExporter {
    database: PathBuf,
    commands: ToolkitCommands,
}

impl ToolkitExporter {
    /// Creates an exporter for `database` using the `mdb-*` commands
    /// from PATH.
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self::with_commands(database, ToolkitCommands::default())
    }

    /// Creates an exporter with explicit command locations.
    pub fn with_commands(database: impl Into<PathBuf>, commands: ToolkitCommands) -> Self {
        Self {
            database: database.into(),
            commands,
        }
    }

    /// Runs one toolkit command to completion and returns its stdout.
    ///
    /// A spawn failure with `NotFound` means the toolkit is not
    /// installed, which is fatal for the whole run; any other failure is
    /// scoped to the operation that triggered it.
    async fn run(&self, program: &Path, args: &[&OsStr]) -> Result<Vec<u8>> {
        let output = Command::new(program).args(args).output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExportError::toolkit_unavailable(format!(
                    "{} not found; install mdbtools",
                    program.display()
                ))
            } else {
                ExportError::io(format!("failed to run {}", program.display()), e)
            }
        })?;

        if !output.status.success() {
            return Err(ExportError::command_failed(
                program.display().to_string(),
                output.status,
                &output.stderr,
            ));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl Exporter for ToolkitExporter {
    async fn test_source(&self) -> Result<()> {
        let stdout = self
            .run(&self.commands.ver, &[self.database.as_os_str()])
            .await?;
        tracing::debug!(
            "mdb-ver reported {}",
            String::from_utf8_lossy(&stdout).trim()
        );
        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let stdout = self
            .run(
                &self.commands.tables,
                &[OsStr::new("-1"), self.database.as_os_str()],
            )
            .await?;

        let tables = String::from_utf8_lossy(&stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect();
        Ok(tables)
    }

    async fn export_table(&self, table: &str, dest: &Path) -> Result<u64> {
        let stdout = self
            .run(
                &self.commands.export,
                &[self.database.as_os_str(), OsStr::new(table)],
            )
            .await?;

        tokio::fs::write(dest, &stdout)
            .await
            .map_err(|e| ExportError::io(format!("failed to write {}", dest.display()), e))?;

        helpers::count_csv_rows(&stdout)
    }

    async fn dump_schema(&self, output_dir: &Path) -> Result<PathBuf> {
        let stdout = self
            .run(&self.commands.schema, &[self.database.as_os_str()])
            .await?;

        let path = output_dir.join(SCHEMA_TEXT_FILENAME);
        tokio::fs::write(&path, &stdout)
            .await
            .map_err(|e| ExportError::io(format!("failed to write {}", path.display()), e))?;
        Ok(path)
    }

    fn backend(&self) -> Backend {
        Backend::Toolkit
    }
}
