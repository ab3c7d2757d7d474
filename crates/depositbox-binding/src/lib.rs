//! DepositBox Binding - wires the deposit core into a host world
//!
//! ```text
//! host events ──► DepositBox ──► ContainerBinding (per container)
//!                    │                 │
//!                    │                 ├─ can_accept   → AdmissionPolicy + PendingTransfers
//!                    │                 └─ item_changed → DepositLogStore::append, remove item
//!                    │
//!                    └─ commands ──► SummaryEngine ──► SnapshotCell::publish
//! ```

pub mod binding;
pub mod commands;
pub mod depositbox;
pub mod error;
pub mod host;
pub mod messages;

pub use binding::{BindingState, ContainerBinding};
pub use commands::{
    deposit_summary, give_deposit_box, parse_prize_pool, CommandSender, PERM_ADMIN_CHECK,
    PERM_PLACE,
};
pub use depositbox::{DepositBox, DepositOutcome};
pub use depositbox_admission::{AdmissionDecision, RejectReason};
pub use error::{BindingError, BindingResult, CommandError};
pub use host::{ContainerInfo, HookHandle, Host, ItemChange, TransferAttempt, TransferHook};
pub use messages::Message;
