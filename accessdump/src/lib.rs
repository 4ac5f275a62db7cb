//! Library surface for the accessdump binary.
//!
//! Exposes the export workflow so integration tests can drive it
//! directly; the CLI entry point lives in main.rs.

pub mod export;
