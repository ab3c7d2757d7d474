//! DepositBox CLI - operator console
//!
//! Runs the trusted-console side of the subsystem against a data directory:
//! summaries, log inspection and limit checks.
//!
//! The console runs in its own process, so `summary` is a second writer of
//! `DepositBoxSummary.json` next to a running `DepositBox`. The running
//! instance keeps admitting against its own published snapshot until
//! `DepositBox::reload_snapshot` is called; the next in-process summary
//! overwrites the console's files.

pub mod commands;
pub mod context;

pub use context::AppContext;
