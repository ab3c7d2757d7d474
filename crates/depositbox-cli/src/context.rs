//! Application context - wires the stores together for one data directory

use depositbox_admission::AdmissionPolicy;
use depositbox_core::{DataPaths, DepositBoxConfig};
use depositbox_log::DepositLogStore;
use depositbox_summary::{AggregateSnapshot, SnapshotStore, SummaryEngine};
use std::path::{Path, PathBuf};

pub struct AppContext {
    pub config: DepositBoxConfig,
    pub policy: AdmissionPolicy,
    pub log: DepositLogStore,
    pub summary: SummaryEngine,
    paths: DataPaths,
    config_path: PathBuf,
}

impl AppContext {
    /// Open `data_dir`. The config defaults to `<data_dir>/DepositBox.json`
    /// and is created with default values if missing.
    ///
    /// The console never repairs a corrupt log; it reports the error instead.
    pub fn new(data_dir: impl AsRef<Path>, config_path: Option<&Path>) -> anyhow::Result<Self> {
        let paths = DataPaths::new(data_dir);
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_config_path(paths.root()));

        let config = DepositBoxConfig::load_or_create(&config_path)?;
        let log = DepositLogStore::open(paths.log_file())?;
        let summary = SummaryEngine::new(SnapshotStore::new(paths.clone()));

        tracing::debug!(
            data = %paths.root().display(),
            config = %config_path.display(),
            deposits = log.len(),
            "Opened data directory"
        );

        Ok(Self {
            policy: AdmissionPolicy::from_config(&config),
            config,
            log,
            summary,
            paths,
            config_path,
        })
    }

    /// The snapshot the admission check would currently see
    pub fn snapshot(&self) -> AggregateSnapshot {
        self.summary.store().read_snapshot_or_empty()
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

pub fn default_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("DepositBox.json")
}
