//! Binding and command errors

use depositbox_core::{ActorId, ContainerId};
use depositbox_log::LogError;
use depositbox_summary::SummaryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("Binding for {0} was already destroyed")]
    AlreadyDestroyed(ContainerId),

    #[error("Deposit log error: {0}")]
    Log(#[from] LogError),

    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),
}

/// Result type for binding operations
pub type BindingResult<T> = Result<T, BindingError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{actor} lacks permission {permission}")]
    PermissionDenied {
        actor: ActorId,
        permission: &'static str,
    },

    #[error("Could not deliver a deposit box to {0}")]
    GiveFailed(ActorId),

    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl CommandError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, CommandError::PermissionDenied { .. })
    }
}
