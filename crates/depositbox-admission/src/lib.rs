//! DepositBox Admission - the two-phase deposit gate
//!
//! ```text
//! may-accept hook                      item-added hook
//!     │                                      │
//!     ▼                                      ▼
//! ┌──────────────────────┐           ┌──────────────────────┐
//! │ AdmissionPolicy      │  accept   │ PendingTransfers     │
//! │ (last snapshot only) │──record──►│ resolve(item)        │──► log append
//! └──────────────────────┘           └──────────────────────┘
//!     │ reject
//!     ▼
//! message to actor
//! ```

pub mod pending;
pub mod policy;

pub use pending::{PendingTransfer, PendingTransfers};
pub use policy::{AdmissionDecision, AdmissionPolicy, RejectReason};
