//! End-to-end tests of the export workflow against stub mdb-* executables.

#![cfg(unix)]
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use accessdump::export;
use accessdump_core::config::{EXPORT_TABLES, ExportConfig};
use accessdump_core::error::ExportError;
use accessdump_core::exporters::{ToolkitCommands, ToolkitExporter};
use accessdump_core::models::ExportOutcome;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("failed to write stub");
    let mut perms = fs::metadata(&path).expect("failed to stat stub").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("failed to chmod stub");
    path
}

/// Stub toolkit whose table listing contains exactly `listed`.
/// `TBL_USER` exports two data rows, every other table one.
fn doorcard_commands(dir: &Path, listed: &[&str]) -> ToolkitCommands {
    let listing = listed.join("\\n");
    ToolkitCommands {
        ver: write_stub(dir, "mdb-ver", "echo JET4"),
        tables: write_stub(dir, "mdb-tables", &format!("printf '{listing}\\n'")),
        export: write_stub(
            dir,
            "mdb-export",
            "case \"$2\" in\n\
             TBL_USER) printf 'ID,Name\\n1,Alice\\n2,Bob\\n' ;;\n\
             *) printf 'ID\\n1\\n' ;;\n\
             esac",
        ),
        schema: write_stub(dir, "mdb-schema", "echo 'CREATE TABLE [TBL_USER] (ID Long Integer);'"),
    }
}

fn doorcard_config(out_dir: &Path) -> ExportConfig {
    ExportConfig::new("./doorcard.accdb").with_output_dir(out_dir)
}

#[tokio::test]
async fn test_full_run_exports_all_configured_tables() {
    let stubs = TempDir::new().expect("tempdir");
    let workdir = TempDir::new().expect("tempdir");
    let out_dir = workdir.path().join("export");

    let exporter = ToolkitExporter::with_commands(
        "./doorcard.accdb",
        doorcard_commands(stubs.path(), &EXPORT_TABLES),
    );
    let report = export::export_database(&exporter, &doorcard_config(&out_dir))
        .await
        .expect("run succeeds");

    assert_eq!(report.exported_count(), 5);
    assert_eq!(report.skipped_count(), 0);
    // TBL_USER carries the two-row fixture, the other four one row each
    assert_eq!(report.total_rows(), 6);

    for table in EXPORT_TABLES {
        assert!(
            out_dir.join(format!("{table}.csv")).exists(),
            "missing CSV for {table}"
        );
    }
    assert!(out_dir.join("database-schema.txt").exists());
}

#[tokio::test]
async fn test_missing_table_is_skipped_with_warning_outcome() {
    let stubs = TempDir::new().expect("tempdir");
    let workdir = TempDir::new().expect("tempdir");
    let out_dir = workdir.path().join("export");

    // TBL_TEMPLATE is configured but absent from the source listing.
    let listed: Vec<&str> = EXPORT_TABLES
        .iter()
        .copied()
        .filter(|t| *t != "TBL_TEMPLATE")
        .collect();
    let exporter = ToolkitExporter::with_commands(
        "./doorcard.accdb",
        doorcard_commands(stubs.path(), &listed),
    );
    let report = export::export_database(&exporter, &doorcard_config(&out_dir))
        .await
        .expect("run still succeeds");

    assert_eq!(report.exported_count(), 4);
    assert_eq!(report.skipped_count(), 1);

    let template = report
        .tables
        .iter()
        .find(|t| t.name == "TBL_TEMPLATE")
        .expect("configured table is reported");
    assert_eq!(template.outcome, ExportOutcome::Missing);
    assert!(!out_dir.join("TBL_TEMPLATE.csv").exists());
}

#[tokio::test]
async fn test_failed_table_does_not_abort_the_remaining_tables() {
    let stubs = TempDir::new().expect("tempdir");
    let workdir = TempDir::new().expect("tempdir");
    let out_dir = workdir.path().join("export");

    let mut commands = doorcard_commands(stubs.path(), &EXPORT_TABLES);
    commands.export = write_stub(
        stubs.path(),
        "mdb-export",
        "case \"$2\" in\n\
         TBL_DOORCARD) echo 'read error' >&2; exit 1 ;;\n\
         *) printf 'ID\\n1\\n' ;;\n\
         esac",
    );
    let exporter = ToolkitExporter::with_commands("./doorcard.accdb", commands);
    let report = export::export_database(&exporter, &doorcard_config(&out_dir))
        .await
        .expect("run still succeeds");

    assert_eq!(report.exported_count(), 4);
    let doorcard = report
        .tables
        .iter()
        .find(|t| t.name == "TBL_DOORCARD")
        .expect("configured table is reported");
    assert!(matches!(doorcard.outcome, ExportOutcome::Failed { .. }));
    assert!(!out_dir.join("TBL_DOORCARD.csv").exists());
    assert!(out_dir.join("TBL_USER.csv").exists());
}

#[tokio::test]
async fn test_missing_input_fails_before_any_output() {
    let workdir = TempDir::new().expect("tempdir");
    let out_dir = workdir.path().join("export");

    let config = ExportConfig::new(workdir.path().join("missing.accdb")).with_output_dir(&out_dir);
    let err = export::run(&config).await.expect_err("must fail");

    assert!(matches!(err, ExportError::MissingDatabase { .. }));
    assert!(!out_dir.exists());
}

#[tokio::test]
async fn test_rerun_overwrites_artifacts_identically() {
    let stubs = TempDir::new().expect("tempdir");
    let workdir = TempDir::new().expect("tempdir");
    let out_dir = workdir.path().join("export");

    let exporter = ToolkitExporter::with_commands(
        "./doorcard.accdb",
        doorcard_commands(stubs.path(), &EXPORT_TABLES),
    );
    let config = doorcard_config(&out_dir);

    export::export_database(&exporter, &config)
        .await
        .expect("first run succeeds");
    let first = fs::read(out_dir.join("TBL_USER.csv")).expect("artifact readable");

    export::export_database(&exporter, &config)
        .await
        .expect("second run succeeds");
    let second = fs::read(out_dir.join("TBL_USER.csv")).expect("artifact readable");

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_reported_row_counts_match_written_artifacts() {
    let stubs = TempDir::new().expect("tempdir");
    let workdir = TempDir::new().expect("tempdir");
    let out_dir = workdir.path().join("export");

    let exporter = ToolkitExporter::with_commands(
        "./doorcard.accdb",
        doorcard_commands(stubs.path(), &EXPORT_TABLES),
    );
    let report = export::export_database(&exporter, &doorcard_config(&out_dir))
        .await
        .expect("run succeeds");

    for table in &report.tables {
        let ExportOutcome::Exported { rows } = &table.outcome else {
            panic!("unexpected outcome for {}", table.name);
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(out_dir.join(format!("{}.csv", table.name)))
            .expect("artifact parses");
        let counted = reader.byte_records().count() as u64;
        assert_eq!(counted, *rows, "row count mismatch for {}", table.name);
    }
}
