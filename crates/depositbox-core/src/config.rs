//! DepositBox configuration
//!
//! Loaded once at startup from a JSON file. Keys keep their historical
//! PascalCase names so existing config files keep working; any key that is
//! missing falls back to its default.

use crate::ids::{ResourceId, SkinId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or writing the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Scalar policy values for the deposit subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositBoxConfig {
    /// Resource type eligible for deposit
    #[serde(rename = "DepositItemID", default = "default_tracked_resource")]
    pub tracked_resource: ResourceId,

    /// Skin that marks a container as managed
    #[serde(rename = "DepositBoxSkinID", default = "default_container_skin")]
    pub container_skin: SkinId,

    /// Snapshot total at or above which an actor's deposits are rejected
    #[serde(rename = "MaxDepositLimit", default = "default_max_deposit_limit")]
    pub max_deposit_limit: u64,

    /// Prize pool used when a summary is triggered without one
    #[serde(rename = "DefaultPrizePool", default = "default_prize_pool")]
    pub default_prize_pool: u64,

    /// Age after which an accepted-but-never-committed transfer is evicted
    #[serde(rename = "PendingMaxAgeSecs", default = "default_pending_max_age_secs")]
    pub pending_max_age_secs: u64,

    /// Item handed out by the grant-container command
    #[serde(rename = "ContainerItemID", default = "default_container_item")]
    pub container_item: ResourceId,
}

fn default_tracked_resource() -> ResourceId {
    ResourceId(-1_779_183_908)
}

fn default_container_skin() -> SkinId {
    SkinId(1_641_384_897)
}

fn default_max_deposit_limit() -> u64 {
    1000
}

fn default_prize_pool() -> u64 {
    100_000
}

fn default_pending_max_age_secs() -> u64 {
    300
}

fn default_container_item() -> ResourceId {
    ResourceId(833_533_164)
}

impl Default for DepositBoxConfig {
    fn default() -> Self {
        Self {
            tracked_resource: default_tracked_resource(),
            container_skin: default_container_skin(),
            max_deposit_limit: default_max_deposit_limit(),
            default_prize_pool: default_prize_pool(),
            pending_max_age_secs: default_pending_max_age_secs(),
            container_item: default_container_item(),
        }
    }
}

impl DepositBoxConfig {
    /// Load configuration from JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load the config file, writing the defaults first if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }

        tracing::warn!(path = %path.display(), "Creating a new configuration file");
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Orphan eviction age as Duration
    pub fn pending_max_age(&self) -> Duration {
        Duration::from_secs(self.pending_max_age_secs)
    }
}
