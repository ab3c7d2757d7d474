//! Summary errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Prize pool must be positive")]
    InvalidPrizePool,

    #[error("Deposit totals overflow")]
    Overflow,

    #[error("Failed to write {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot {} is corrupt: {source}", .path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for summary operations
pub type SummaryResult<T> = Result<T, SummaryError>;
