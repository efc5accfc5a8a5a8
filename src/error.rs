//! Error taxonomy for loading, mapping, and rendering

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid record (account {acctno}): {reason}")]
    InvalidRecord { acctno: u64, reason: String },

    #[error("invalid mapping table {table}: {reason}")]
    InvalidTable { table: &'static str, reason: String },

    #[error("invalid BNM code {0:?}")]
    InvalidCode(String),

    #[error("amount overflow in {0}")]
    Overflow(String),

    #[error("invalid report configuration: {0}")]
    InvalidConfig(String),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn table(table: &'static str, reason: impl Into<String>) -> Self {
        ReportError::InvalidTable {
            table,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
