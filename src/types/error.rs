//! Error types for the escrow dashboard engine
//!
//! The classification, filtering and ordering core is total and never fails.
//! Errors only arise at the edges: opening input files, parsing CSV rows and
//! writing output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid field values
//! - **Output Errors**: Failures while writing the report

use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Main error type for the dashboard engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// File not found at the specified path
    ///
    /// Fatal for the sync strategy; the async strategy skips the source.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable: the malformed row is skipped.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A required column was empty
    #[error("Missing {field}{}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MissingField {
        /// Column name
        field: String,
        /// Line number (if available)
        line: Option<u64>,
    },

    /// Amount value could not be parsed as a decimal
    #[error("Invalid amount '{amount}' for record {id}")]
    InvalidAmount {
        /// The invalid amount string
        amount: String,
        /// Record identifier
        id: String,
    },

    /// Dispute priority label not recognised
    #[error("Invalid priority '{priority}' for dispute {id}")]
    InvalidPriority {
        priority: String,
        id: String,
    },

    /// Dispute last-action kind or actor not recognised
    #[error("Invalid last action '{action}' for dispute {id}")]
    InvalidLastAction {
        action: String,
        id: String,
    },

    /// Writing the report failed
    #[error("Output error: {message}")]
    OutputError {
        message: String,
    },
}

impl From<std::io::Error> for DashboardError {
    fn from(error: std::io::Error) -> Self {
        DashboardError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for DashboardError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return DashboardError::IoError {
                message: error.to_string(),
            };
        }
        let line = error.position().map(|pos| pos.line());

        DashboardError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for DashboardError {
    fn from(error: csv_async::Error) -> Self {
        if matches!(error.kind(), csv_async::ErrorKind::Io(_)) {
            return DashboardError::IoError {
                message: error.to_string(),
            };
        }
        DashboardError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

impl DashboardError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        DashboardError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Map a failure to open an input source
    pub fn open_failed(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::file_not_found(&path.display().to_string()),
            _ => DashboardError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            },
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: &str, line: Option<u64>) -> Self {
        DashboardError::MissingField {
            field: field.to_string(),
            line,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, id: &str) -> Self {
        DashboardError::InvalidAmount {
            amount: amount.to_string(),
            id: id.to_string(),
        }
    }

    /// Create an InvalidPriority error
    pub fn invalid_priority(priority: &str, id: &str) -> Self {
        DashboardError::InvalidPriority {
            priority: priority.to_string(),
            id: id.to_string(),
        }
    }

    /// Create an InvalidLastAction error
    pub fn invalid_last_action(action: &str, id: &str) -> Self {
        DashboardError::InvalidLastAction {
            action: action.to_string(),
            id: id.to_string(),
        }
    }

    /// Create an OutputError
    pub fn output(message: impl std::fmt::Display) -> Self {
        DashboardError::OutputError {
            message: message.to_string(),
        }
    }

    /// Attach a line number to row-level errors that do not carry one yet
    pub fn at_line(self, line: u64) -> Self {
        match self {
            DashboardError::ParseError { line: None, message } => DashboardError::ParseError {
                line: Some(line),
                message,
            },
            DashboardError::MissingField { field, line: None } => DashboardError::MissingField {
                field,
                line: Some(line),
            },
            other => other,
        }
    }

    /// Whether processing can continue past this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            DashboardError::FileNotFound { .. }
                | DashboardError::IoError { .. }
                | DashboardError::OutputError { .. }
        )
    }
}
