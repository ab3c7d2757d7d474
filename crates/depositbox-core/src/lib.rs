//! DepositBox Core - Domain types
//!
//! This crate contains the fundamental types shared across DepositBox:
//! - Host identities: `ActorId`, `ItemId`, `ContainerId`, `ResourceId`, `SkinId`
//! - `Amount`: positive quantity of the tracked resource
//! - `DepositRecord`: one durable deposit fact
//! - `DepositBoxConfig` and `DataPaths`: startup configuration and file layout

pub mod amount;
pub mod config;
pub mod ids;
pub mod paths;
pub mod record;

pub use amount::{Amount, AmountError};
pub use config::{ConfigError, DepositBoxConfig};
pub use ids::{ActorId, ContainerId, ItemId, ResourceId, SkinId};
pub use paths::DataPaths;
pub use record::DepositRecord;
