//! Error types shared between the normalizer and the presentation shell.
//!
//! The `AdvisorError` enum keeps the two recoverable load failures apart
//! (`SourceNotFound` and `SchemaIncomplete`) so callers and tests can tell
//! "file absent" from "file present but unusable", even though the shell shows
//! the same notice for both.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Unified error type shared by the workspace.
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// No CSV file exists for the requested ticker.
    #[error("CSV file for {ticker} not found at {}", path.display())]
    SourceNotFound {
        /// Ticker that was looked up.
        ticker: String,
        /// Path that was probed.
        path: PathBuf,
    },

    /// After reconciliation some canonical columns are still absent.
    #[error("Data for {ticker} is missing required column(s): {}", missing.join(", "))]
    SchemaIncomplete {
        /// Ticker whose file was read.
        ticker: String,
        /// Canonical column names that could not be found.
        missing: Vec<String>,
    },

    /// I/O error originating from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed CSV content (e.g. invalid UTF-8 in a record).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A ticker symbol outside the offered set.
    #[error("Unknown ticker: {0}")]
    InvalidTicker(String),

    /// An interactive prompt line that is not a known command.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl AdvisorError {
    /// Short machine-friendly name of the failure cause.
    pub fn kind(&self) -> &'static str {
        match self {
            AdvisorError::SourceNotFound { .. } => "source_not_found",
            AdvisorError::SchemaIncomplete { .. } => "schema_incomplete",
            AdvisorError::Io(_) => "io",
            AdvisorError::Csv(_) => "csv",
            AdvisorError::SerdeJson(_) => "json",
            AdvisorError::InvalidTicker(_) => "invalid_ticker",
            AdvisorError::InvalidCommand(_) => "invalid_command",
        }
    }
}
