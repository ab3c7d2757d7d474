//! Deposit log store - append-only JSON document
//!
//! The whole log is one document `{ "deposits": [...] }`. Every append
//! rewrites it through a temp file + rename and syncs before returning, so
//! the file on disk always matches the in-memory sequence.

use crate::error::{LogError, LogResult};
use chrono::Utc;
use depositbox_core::DepositRecord;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Persisted shape of the log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepositLog {
    #[serde(default)]
    pub deposits: Vec<DepositRecord>,
}

/// Append-only deposit history, the single source of truth for deposits
pub struct DepositLogStore {
    path: PathBuf,
    log: DepositLog,
}

impl DepositLogStore {
    /// Open the log at `path`, starting empty if the file does not exist.
    ///
    /// Fails with `CorruptData` if the file exists but cannot be parsed.
    pub fn open(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref().to_path_buf();
        let deposits = Self::load_all(&path)?;

        tracing::debug!(path = %path.display(), records = deposits.len(), "Deposit log loaded");

        Ok(Self {
            path,
            log: DepositLog { deposits },
        })
    }

    /// Open the log, moving an unparseable file aside instead of failing.
    ///
    /// The corrupt file is renamed, never rewritten, and a fresh empty log is
    /// started at `path`. Returns where the corrupt data was moved to.
    pub fn open_or_recover(path: impl AsRef<Path>) -> LogResult<(Self, Option<PathBuf>)> {
        let path = path.as_ref();

        match Self::open(path) {
            Ok(store) => Ok((store, None)),
            Err(LogError::CorruptData { source, .. }) => {
                let quarantined = quarantine_path(path);
                fs::rename(path, &quarantined)?;

                tracing::error!(
                    error = %source,
                    moved_to = %quarantined.display(),
                    "Deposit log is corrupt, starting with an empty log"
                );

                let store = Self {
                    path: path.to_path_buf(),
                    log: DepositLog::default(),
                };
                Ok((store, Some(quarantined)))
            }
            Err(e) => Err(e),
        }
    }

    /// Read the full ordered sequence from disk.
    ///
    /// Returns an empty sequence if no log exists yet.
    pub fn load_all(path: impl AsRef<Path>) -> LogResult<Vec<DepositRecord>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let log: DepositLog =
            serde_json::from_str(&content).map_err(|source| LogError::CorruptData {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(log.deposits)
    }

    /// Append a record and flush it to stable storage.
    ///
    /// On failure the in-memory sequence is rolled back, so it never
    /// diverges from what is durable.
    pub fn append(&mut self, record: DepositRecord) -> LogResult<()> {
        self.log.deposits.push(record);

        if let Err(source) = self.persist() {
            self.log.deposits.pop();
            return Err(LogError::Persistence {
                path: self.path.clone(),
                source,
            });
        }

        Ok(())
    }

    /// All records in append order
    pub fn records(&self) -> &[DepositRecord] {
        &self.log.deposits
    }

    pub fn len(&self) -> usize {
        self.log.deposits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.deposits.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.log).map_err(std::io::Error::other)?;

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        sync_parent_dir(&self.path)
    }
}

/// Flush the directory entry so the rename itself survives a crash
fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        File::open(parent)?.sync_all()?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

fn quarantine_path(path: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "DepositBoxLog.json".to_string());
    path.with_file_name(format!("{name}.corrupt-{stamp}"))
}
