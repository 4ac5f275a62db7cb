//! Run configuration and the fixed export inventory.
//!
//! The defaults mirror the legacy extraction workflow this tool replaces:
//! a `doorcard.accdb` file next to the working directory and a CSV drop
//! under `db-items/new-export`.

use std::path::PathBuf;

/// Database path used when no positional argument is given.
pub const DEFAULT_DATABASE_PATH: &str = "./doorcard.accdb";

/// Directory the CSV files and schema artifact are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "./db-items/new-export";

/// The tables this tool extracts, in export order.
pub const EXPORT_TABLES: [&str; 5] = [
    "TBL_USER",
    "TBL_DOORCARD",
    "TBL_APPOINTMENT",
    "TBL_CATEGORY",
    "TBL_TEMPLATE",
];

/// Naming convention for application tables; the driver backend limits
/// schema introspection to tables matching this prefix.
pub const TABLE_PREFIX: &str = "TBL_";

/// File name of the toolkit backend's schema artifact.
pub const SCHEMA_TEXT_FILENAME: &str = "database-schema.txt";

/// File name of the driver backend's schema artifact.
pub const SCHEMA_JSON_FILENAME: &str = "database-schema.json";

/// Configuration for one extraction run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Path to the Access database file
    pub database: PathBuf,
    /// Directory that receives the CSV files and schema artifact
    pub output_dir: PathBuf,
    /// Tables to export, in order
    pub tables: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            tables: EXPORT_TABLES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ExportConfig {
    /// Creates a config for the given database with default output
    /// directory and table list.
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Builder method to replace the table list.
    pub fn with_tables(mut self, tables: Vec<String>) -> Self {
        self.tables = tables;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.database, PathBuf::from("./doorcard.accdb"));
        assert_eq!(config.output_dir, PathBuf::from("./db-items/new-export"));
        assert_eq!(config.tables.len(), 5);
        assert_eq!(config.tables[0], "TBL_USER");
        assert_eq!(config.tables[4], "TBL_TEMPLATE");
    }

    #[test]
    fn test_builder_overrides() {
        let config = ExportConfig::new("/data/legacy.mdb")
            .with_output_dir("/tmp/out")
            .with_tables(vec!["TBL_USER".to_string()]);

        assert_eq!(config.database, PathBuf::from("/data/legacy.mdb"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.tables, vec!["TBL_USER".to_string()]);
    }

    #[test]
    fn test_export_tables_follow_prefix_convention() {
        for table in EXPORT_TABLES {
            assert!(table.starts_with(TABLE_PREFIX));
        }
    }
}
