//! Deposit log errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Failed to persist deposit log {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Deposit log {} is corrupt: {source}", .path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// Check if this is a parse failure of existing data
    pub fn is_corrupt(&self) -> bool {
        matches!(self, LogError::CorruptData { .. })
    }
}

/// Result type for deposit log operations
pub type LogResult<T> = Result<T, LogError>;
