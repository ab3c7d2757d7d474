//! DepositBox Log - append-only deposit history
//!
//! This crate persists every accepted-and-committed deposit. The log is the
//! source of truth; summaries and snapshots are disposable views over it.

pub mod error;
pub mod store;

pub use error::{LogError, LogResult};
pub use store::{DepositLog, DepositLogStore};
