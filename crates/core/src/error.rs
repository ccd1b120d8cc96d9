use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Failure talking to the job listing.
#[derive(Debug, ThisError)]
pub enum FetchError {
    #[error("Failed to fetch jobs: {0}")]
    Status(u16),

    #[error("Failed to fetch jobs: {0}")]
    Transport(String),

    #[error("Failed to decode job listing: {0}")]
    Decode(String),
}

/// Failure reading the persisted table for the dashboard.
///
/// Row numbers are 1-based and count data rows only (the header is row 0).
#[derive(Debug, ThisError)]
pub enum DashboardLoadError {
    #[error("file not found, run the pipeline first")]
    Missing,

    #[error("could not open file")]
    Io(#[source] std::io::Error),

    #[error("unexpected columns: expected [{expected}], found [{found}]")]
    Schema { expected: String, found: String },

    #[error("row {row}: {message}")]
    Malformed { row: usize, message: String },

    #[error("row {row}, column {column}: invalid value {value:?}")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to write {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: DashboardLoadError,
    },
}

impl Error {
    /// Renders the error and every underlying cause on one line.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut cause = StdError::source(self);
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = StdError::source(err);
        }
        message
    }
}
