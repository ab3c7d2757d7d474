//! DepositBox Summary - aggregation and prize pool allocation
//!
//! ```text
//! DepositBoxLog.json ──replay──► aggregate() ──► Summary
//!                                                  │
//!                     ┌────────────────────────────┼──────────────────────┐
//!                     ▼                            ▼                      ▼
//!        DepositBoxSummary.json        DepositBoxClaims.json   DepositBoxSummary.csv
//!                     │
//!                     └──► AggregateSnapshot (read by admission checks)
//! ```
//!
//! ## Key Components
//!
//! - [`engine::SummaryEngine`] - Sole writer of the snapshot
//! - [`snapshot::AggregateSnapshot`] - Last published per-actor totals
//! - [`snapshot::SnapshotCell`] - Immutable published snapshot, swapped on publish
//! - [`store::SnapshotStore`] - Reads/writes the three summary files
//! - [`csv::CsvExporter`] - Delimited-text export

pub mod csv;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod store;

pub use csv::{format_percentage, CsvExporter};
pub use engine::{aggregate, Summary, SummaryEngine};
pub use error::{SummaryError, SummaryResult};
pub use snapshot::{ActorSummary, AggregateSnapshot, SnapshotCell};
pub use store::SnapshotStore;
