//! Driver-backed exporter over the Access ODBC driver (Windows only).
//!
//! One connection is opened at construction and reused for every
//! operation. ODBC handles are `Send` but not `Sync`, so the connection
//! lives behind a mutex; contention never occurs because the workflow is
//! strictly sequential.

use super::{Exporter, helpers};
use crate::Result;
use crate::config::{SCHEMA_JSON_FILENAME, TABLE_PREFIX};
use crate::error::ExportError;
use crate::models::{Backend, ColumnDescriptor, SchemaDocument, TableSchema};
use async_trait::async_trait;
use odbc_api::{Connection, ConnectionOptions, Cursor, ResultSetMetadata, buffers::TextRowSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Rows fetched per ODBC round trip.
const BATCH_SIZE: usize = 500;

/// Upper bound on one text cell, in bytes. Access memo fields can exceed
/// this; they are truncated rather than failing the export.
const MAX_TEXT_LEN: usize = 8192;

/// Export backend built on the Microsoft Access ODBC driver.
pub struct DriverExporter {
    database: PathBuf,
    conn: Mutex<Connection<'static>>,
}

impl std::fmt::Debug for DriverExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Connection handle intentionally omitted
        f.debug_struct("DriverExporter")
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl DriverExporter {
    /// Opens the ODBC connection for `database`.
    ///
    /// The path is made absolute first; the Access driver resolves DBQ
    /// against its own working directory otherwise.
    ///
    /// # Errors
    /// Returns a connection error if the driver is missing or the file
    /// cannot be opened. This is fatal for the whole run.
    pub fn connect(database: &Path) -> Result<Self> {
        let database = std::path::absolute(database)
            .map_err(|e| ExportError::io("failed to resolve database path", e))?;
        let connection_string = helpers::access_connection_string(&database);

        let conn = odbc_api::environment()
            .map_err(ExportError::connection_failed)?
            .connect_with_connection_string(&connection_string, ConnectionOptions::default())
            .map_err(ExportError::connection_failed)?;

        Ok(Self {
            database,
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection<'static>>> {
        self.conn
            .lock()
            .map_err(|_| ExportError::configuration("ODBC connection mutex poisoned"))
    }
}

/// Enumerates table names through `SQLTables`, restricted to user tables.
fn tables_of(conn: &Connection<'static>) -> Result<Vec<String>> {
    let mut cursor = conn
        .tables("", "", "", "TABLE")
        .map_err(|e| ExportError::export_failed("table enumeration failed", e))?;

    // SQLTables result set: TABLE_CAT, TABLE_SCHEM, TABLE_NAME, TABLE_TYPE, REMARKS
    let mut buffers = TextRowSet::for_cursor(BATCH_SIZE, &mut cursor, Some(MAX_TEXT_LEN))
        .map_err(|e| ExportError::export_failed("failed to allocate row buffers", e))?;
    let mut row_set = cursor
        .bind_buffer(&mut buffers)
        .map_err(|e| ExportError::export_failed("failed to bind row buffers", e))?;

    let mut names = Vec::new();
    while let Some(batch) = row_set
        .fetch()
        .map_err(|e| ExportError::export_failed("table metadata fetch failed", e))?
    {
        for row in 0..batch.num_rows() {
            let name = String::from_utf8_lossy(batch.at(2, row).unwrap_or_default());
            if !name.is_empty() {
                names.push(name.into_owned());
            }
        }
    }
    Ok(names)
}

/// Reads one table's column descriptors through `SQLColumns`.
fn columns_of(conn: &Connection<'static>, table: &str) -> Result<Vec<ColumnDescriptor>> {
    let mut cursor = conn
        .columns("", "", table, "%")
        .map_err(|e| ExportError::export_failed(format!("column metadata for {table} failed"), e))?;

    // SQLColumns result set, positions of interest:
    // 4 COLUMN_NAME, 6 TYPE_NAME, 7 COLUMN_SIZE
    let mut buffers = TextRowSet::for_cursor(BATCH_SIZE, &mut cursor, Some(MAX_TEXT_LEN))
        .map_err(|e| ExportError::export_failed("failed to allocate row buffers", e))?;
    let mut row_set = cursor
        .bind_buffer(&mut buffers)
        .map_err(|e| ExportError::export_failed("failed to bind row buffers", e))?;

    let mut columns = Vec::new();
    while let Some(batch) = row_set
        .fetch()
        .map_err(|e| ExportError::export_failed("column metadata fetch failed", e))?
    {
        for row in 0..batch.num_rows() {
            let name = String::from_utf8_lossy(batch.at(3, row).unwrap_or_default()).into_owned();
            let type_name = String::from_utf8_lossy(batch.at(5, row).unwrap_or_default()).into_owned();
            let size = String::from_utf8_lossy(batch.at(6, row).unwrap_or_default())
                .trim()
                .parse::<u32>()
                .ok();
            columns.push(ColumnDescriptor {
                name,
                type_name,
                size,
            });
        }
    }
    Ok(columns)
}

#[async_trait]
impl Exporter for DriverExporter {
    async fn test_source(&self) -> Result<()> {
        // The connection was already established in connect(); this only
        // verifies it is still alive.
        let conn = self.lock()?;
        let dead = conn.is_dead().map_err(ExportError::connection_failed)?;
        if dead {
            return Err(ExportError::configuration("ODBC connection is dead"));
        }
        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let conn = self.lock()?;
        tables_of(&conn)
    }

    async fn export_table(&self, table: &str, dest: &Path) -> Result<u64> {
        let conn = self.lock()?;

        let query = format!("SELECT * FROM [{table}]");
        let cursor = conn
            .execute(&query, (), None)
            .map_err(|e| ExportError::export_failed(format!("query for {table} failed"), e))?;
        let Some(mut cursor) = cursor else {
            return Err(ExportError::configuration(format!(
                "query for {table} produced no result set"
            )));
        };

        let headers: Vec<String> = cursor
            .column_names()
            .map_err(|e| ExportError::export_failed(format!("column names for {table} failed"), e))?
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| ExportError::export_failed(format!("column names for {table} failed"), e))?;

        let mut writer = csv::Writer::from_path(dest)
            .map_err(|e| ExportError::csv(format!("failed to open {}", dest.display()), e))?;
        writer
            .write_record(&headers)
            .map_err(|e| ExportError::csv(format!("failed to write {}", dest.display()), e))?;

        let mut buffers = TextRowSet::for_cursor(BATCH_SIZE, &mut cursor, Some(MAX_TEXT_LEN))
            .map_err(|e| ExportError::export_failed("failed to allocate row buffers", e))?;
        let mut row_set = cursor
            .bind_buffer(&mut buffers)
            .map_err(|e| ExportError::export_failed("failed to bind row buffers", e))?;

        let mut rows: u64 = 0;
        while let Some(batch) = row_set
            .fetch()
            .map_err(|e| ExportError::export_failed(format!("fetch for {table} failed"), e))?
        {
            for row in 0..batch.num_rows() {
                let record = (0..batch.num_cols()).map(|col| batch.at(col, row).unwrap_or_default());
                writer
                    .write_record(record)
                    .map_err(|e| ExportError::csv(format!("failed to write {}", dest.display()), e))?;
                rows += 1;
            }
        }

        writer
            .flush()
            .map_err(|e| ExportError::io(format!("failed to flush {}", dest.display()), e))?;
        Ok(rows)
    }

    async fn dump_schema(&self, output_dir: &Path) -> Result<PathBuf> {
        let document = {
            let conn = self.lock()?;
            let database_name = self.database.file_name().map_or_else(
                || self.database.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            );

            let mut document = SchemaDocument::new(database_name);
            for table in tables_of(&conn)? {
                if !table.starts_with(TABLE_PREFIX) {
                    continue;
                }
                let columns = columns_of(&conn, &table)?;
                document.add_table(TableSchema { table, columns });
            }
            document
        };

        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| ExportError::serialization("failed to serialize schema document", e))?;

        let path = output_dir.join(SCHEMA_JSON_FILENAME);
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| ExportError::io(format!("failed to write {}", path.display()), e))?;
        Ok(path)
    }

    fn backend(&self) -> Backend {
        Backend::Driver
    }
}
