//! Snapshot store - the persisted outputs of a summary
//!
//! Three files are (re)written on every summary:
//! - `DepositBoxSummary.json`: actorId -> { total_deposited, percentage, sats_reward }
//! - `DepositBoxClaims.json`: actorId -> reward
//! - `DepositBoxSummary.csv`: the same rows as delimited text
//!
//! Only the first one is read back, as the admission snapshot.

use crate::csv::CsvExporter;
use crate::engine::Summary;
use crate::error::{SummaryError, SummaryResult};
use crate::snapshot::AggregateSnapshot;
use depositbox_core::{ActorId, DataPaths};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct SnapshotStore {
    paths: DataPaths,
}

impl SnapshotStore {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Overwrite all three representations of the snapshot
    pub fn write(&self, summary: &Summary) -> SummaryResult<()> {
        let dir = self.paths.summary_dir();
        fs::create_dir_all(&dir).map_err(|source| SummaryError::Persistence {
            path: dir.clone(),
            source,
        })?;

        let claims: BTreeMap<&ActorId, u64> = summary
            .snapshot
            .iter()
            .map(|(actor, row)| (actor, row.sats_reward))
            .collect();

        write_json(&self.paths.summary_json(), &summary.snapshot)?;
        write_json(&self.paths.claims_json(), &claims)?;
        write_atomic(
            &self.paths.summary_csv(),
            CsvExporter::new().export(summary).as_bytes(),
        )?;

        Ok(())
    }

    /// Read the persisted snapshot; empty if no summary was ever generated
    pub fn read_snapshot(&self) -> SummaryResult<AggregateSnapshot> {
        let path = self.paths.summary_json();
        if !path.exists() {
            return Ok(AggregateSnapshot::new());
        }

        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| SummaryError::CorruptData { path, source })
    }

    /// Read the persisted snapshot, treating any failure as "no data".
    ///
    /// A broken snapshot must not block every deposit, so unreadable data
    /// degrades to an empty snapshot (every actor's total is 0).
    pub fn read_snapshot_or_empty(&self) -> AggregateSnapshot {
        match self.read_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Could not read deposit summary for limit checks, allowing deposits"
                );
                AggregateSnapshot::new()
            }
        }
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> SummaryResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| SummaryError::Persistence {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    write_atomic(path, json.as_bytes())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> SummaryResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    let result = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path))
        .and_then(|()| sync_parent_dir(path));

    result.map_err(|source| SummaryError::Persistence {
        path: path.to_path_buf(),
        source,
    })
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
