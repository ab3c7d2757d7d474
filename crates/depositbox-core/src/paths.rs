//! On-disk layout of the subsystem's data directory

use std::path::{Path, PathBuf};

const LOG_FILE: &str = "DepositBoxLog.json";
const SUMMARY_DIR: &str = "DepositBox";
const SUMMARY_JSON: &str = "DepositBoxSummary.json";
const CLAIMS_JSON: &str = "DepositBoxClaims.json";
const SUMMARY_CSV: &str = "DepositBoxSummary.csv";

/// Resolves every persisted file from one data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The append-only deposit log
    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    /// Directory holding the three summary outputs
    pub fn summary_dir(&self) -> PathBuf {
        self.root.join(SUMMARY_DIR)
    }

    pub fn summary_json(&self) -> PathBuf {
        self.summary_dir().join(SUMMARY_JSON)
    }

    pub fn claims_json(&self) -> PathBuf {
        self.summary_dir().join(CLAIMS_JSON)
    }

    pub fn summary_csv(&self) -> PathBuf {
        self.summary_dir().join(SUMMARY_CSV)
    }
}
