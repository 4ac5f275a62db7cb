//! Error types for the extraction workflow.
//!
//! One enum covers both backends. Variants that wrap an underlying failure
//! carry a context string plus the source error so messages stay readable
//! while the cause remains inspectable through `std::error::Error::source`.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Main error type for accessdump operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The source database file does not exist
    #[error("database file not found: {}", path.display())]
    MissingDatabase {
        /// Path that was checked
        path: PathBuf,
    },

    /// The mdbtools suite is not callable on this host
    #[error("mdbtools unavailable: {context}")]
    ToolkitUnavailable {
        /// What was attempted and why it failed
        context: String,
    },

    /// A toolkit subprocess ran but exited unsuccessfully
    #[error("{program} failed: {context}")]
    Toolkit {
        /// The command that failed
        program: String,
        /// Exit status and captured stderr
        context: String,
    },

    /// Database connection failed (driver backend)
    #[error("database connection failed: {context}")]
    Connection {
        /// What was being connected to
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A single table export failed
    #[error("table export failed: {context}")]
    Export {
        /// Which table and what went wrong
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration or internal state error
    #[error("configuration error: {message}")]
    Configuration {
        /// Human-readable description
        message: String,
    },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        /// What was being read or written
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing or writing failed
    #[error("CSV processing failed: {context}")]
    Csv {
        /// Which artifact was being processed
        context: String,
        #[source]
        source: csv::Error,
    },

    /// Schema document serialization failed
    #[error("serialization failed: {context}")]
    Serialization {
        /// What was being serialized
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with ExportError
pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    /// Creates a toolkit-unavailable error.
    pub fn toolkit_unavailable(context: impl Into<String>) -> Self {
        Self::ToolkitUnavailable {
            context: context.into(),
        }
    }

    /// Creates an error for a subprocess that exited unsuccessfully.
    ///
    /// Captured stderr is folded into the context so the toolkit's own
    /// diagnostic reaches the console.
    pub fn command_failed(program: impl Into<String>, status: ExitStatus, stderr: &[u8]) -> Self {
        let stderr = String::from_utf8_lossy(stderr);
        let stderr = stderr.trim();
        let context = if stderr.is_empty() {
            format!("exited with {status}")
        } else {
            format!("exited with {status}: {stderr}")
        };
        Self::Toolkit {
            program: program.into(),
            context,
        }
    }

    /// Creates a connection error with context.
    pub fn connection_failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: "could not open the database".to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a per-table export error with context.
    pub fn export_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Export {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a CSV error with context.
    pub fn csv(context: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            context: context.into(),
            source,
        }
    }

    /// Creates a serialization error with context.
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }
}
