//! Per-container binding state machine
//!
//! ```text
//! Unbound ──attach──► Bound ──detach──► Destroyed
//!                       │ attach (no-op)     │ detach (no-op)
//! ```

use crate::error::{BindingError, BindingResult};
use crate::host::{HookHandle, Host, TransferHook};
use depositbox_admission::PendingTransfers;
use depositbox_core::ContainerId;
use std::time::Duration;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BindingState {
    Unbound,
    Bound,
    Destroyed,
}

/// Subscriptions and correlation table for one managed container
#[derive(Debug)]
pub struct ContainerBinding {
    container: ContainerId,
    state: BindingState,
    /// (can-accept, item-changed)
    hooks: Option<(HookHandle, HookHandle)>,
    pending: PendingTransfers,
}

impl ContainerBinding {
    pub fn new(container: ContainerId, pending_max_age: Duration) -> Self {
        Self {
            container,
            state: BindingState::Unbound,
            hooks: None,
            pending: PendingTransfers::new(pending_max_age),
        }
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    pub fn is_bound(&self) -> bool {
        self.state == BindingState::Bound
    }

    pub fn pending(&self) -> &PendingTransfers {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut PendingTransfers {
        &mut self.pending
    }

    /// Subscribe both transfer hooks.
    ///
    /// Attaching a bound binding does nothing. A destroyed binding cannot be
    /// revived; the container must get a fresh binding.
    pub fn attach<H: Host + ?Sized>(&mut self, host: &mut H) -> BindingResult<()> {
        match self.state {
            BindingState::Bound => Ok(()),
            BindingState::Destroyed => Err(BindingError::AlreadyDestroyed(self.container)),
            BindingState::Unbound => {
                let can_accept = host.subscribe(self.container, TransferHook::CanAccept);
                let item_changed = host.subscribe(self.container, TransferHook::ItemChanged);
                self.hooks = Some((can_accept, item_changed));
                self.state = BindingState::Bound;

                tracing::info!(container = %self.container, "Deposit box bound");
                Ok(())
            }
        }
    }

    /// Unsubscribe both hooks and drop pending entries. Safe to call twice.
    pub fn detach<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.state == BindingState::Destroyed {
            return;
        }

        if let Some((can_accept, item_changed)) = self.hooks.take() {
            host.unsubscribe(can_accept);
            host.unsubscribe(item_changed);
        }

        if !self.pending.is_empty() {
            tracing::warn!(
                container = %self.container,
                pending = self.pending.len(),
                "Dropping admitted transfers on unbind"
            );
        }
        self.pending.clear();
        self.state = BindingState::Destroyed;

        tracing::info!(container = %self.container, "Deposit box unbound");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ContainerInfo, HookHandle};
    use depositbox_core::{ActorId, ItemId, ResourceId, SkinId};

    #[derive(Default)]
    struct CountingHost {
        next: u64,
        active: Vec<HookHandle>,
    }

    impl Host for CountingHost {
        fn containers(&self) -> Vec<ContainerInfo> {
            Vec::new()
        }

        fn subscribe(&mut self, _container: ContainerId, _hook: TransferHook) -> HookHandle {
            self.next += 1;
            let handle = HookHandle(self.next);
            self.active.push(handle);
            handle
        }

        fn unsubscribe(&mut self, handle: HookHandle) {
            self.active.retain(|h| *h != handle);
        }

        fn remove_item(&mut self, _item: ItemId) {}

        fn give_item(&mut self, _: &ActorId, _: ResourceId, _: u32, _: SkinId) -> bool {
            true
        }

        fn send_message(&mut self, _actor: &ActorId, _message: &str) {}

        fn has_permission(&self, _actor: &ActorId, _permission: &str) -> bool {
            false
        }
    }

    fn binding() -> ContainerBinding {
        ContainerBinding::new(ContainerId(1), Duration::from_secs(300))
    }

    #[test]
    fn test_attach_subscribes_two_hooks() {
        let mut host = CountingHost::default();
        let mut binding = binding();

        binding.attach(&mut host).unwrap();

        assert_eq!(binding.state(), BindingState::Bound);
        assert_eq!(host.active.len(), 2);
    }

    #[test]
    fn test_attach_twice_is_noop() {
        let mut host = CountingHost::default();
        let mut binding = binding();

        binding.attach(&mut host).unwrap();
        binding.attach(&mut host).unwrap();

        assert_eq!(host.active.len(), 2);
    }

    #[test]
    fn test_detach_idempotent() {
        let mut host = CountingHost::default();
        let mut binding = binding();
        binding.attach(&mut host).unwrap();
        binding
            .pending_mut()
            .record(ItemId(9), ActorId::from("A"));

        binding.detach(&mut host);
        binding.detach(&mut host);

        assert_eq!(binding.state(), BindingState::Destroyed);
        assert!(host.active.is_empty());
        assert!(binding.pending().is_empty());
    }

    #[test]
    fn test_detach_unbound_marks_destroyed() {
        let mut host = CountingHost::default();
        let mut binding = binding();

        binding.detach(&mut host);
        assert_eq!(binding.state(), BindingState::Destroyed);
    }

    #[test]
    fn test_destroyed_cannot_reattach() {
        let mut host = CountingHost::default();
        let mut binding = binding();
        binding.attach(&mut host).unwrap();
        binding.detach(&mut host);

        let err = binding.attach(&mut host).unwrap_err();
        assert!(matches!(err, BindingError::AlreadyDestroyed(ContainerId(1))));
        assert!(host.active.is_empty());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(BindingState::Destroyed.to_string(), "destroyed");
    }
}
