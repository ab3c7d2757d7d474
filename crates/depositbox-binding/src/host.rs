//! Host platform interface
//!
//! The host owns the world: it spawns containers and items, fires transfer
//! events, and knows who may do what. DepositBox only sees it through this
//! trait, so any game server (or a test double) can drive the subsystem.

use depositbox_core::{ActorId, ContainerId, ItemId, ResourceId, SkinId};

/// A container as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerInfo {
    pub id: ContainerId,
    pub skin: SkinId,
}

/// Pre-commit "may this item enter the container" event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferAttempt {
    pub item: ItemId,
    pub resource: ResourceId,
    pub amount: u64,
    /// Actor currently holding the item, if the host can resolve one
    pub owner: Option<ActorId>,
}

/// Post-commit "item was added to / removed from the container" event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemChange {
    pub item: ItemId,
    pub resource: ResourceId,
    pub amount: u64,
    pub added: bool,
}

/// The two transfer-event streams a binding subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferHook {
    CanAccept,
    ItemChanged,
}

/// Host-issued token for one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookHandle(pub u64);

pub trait Host {
    /// Every container currently in the world
    fn containers(&self) -> Vec<ContainerInfo>;

    /// Route `hook` events of `container` to the subsystem
    fn subscribe(&mut self, container: ContainerId, hook: TransferHook) -> HookHandle;

    fn unsubscribe(&mut self, handle: HookHandle);

    /// Destroy an item so its quantity is consumed
    fn remove_item(&mut self, item: ItemId);

    /// Put a new item into an actor's inventory; false if it could not be delivered
    fn give_item(&mut self, actor: &ActorId, item: ResourceId, amount: u32, skin: SkinId) -> bool;

    fn send_message(&mut self, actor: &ActorId, message: &str);

    fn has_permission(&self, actor: &ActorId, permission: &str) -> bool;
}

impl<T: Host + ?Sized> Host for &mut T {
    fn containers(&self) -> Vec<ContainerInfo> {
        (**self).containers()
    }

    fn subscribe(&mut self, container: ContainerId, hook: TransferHook) -> HookHandle {
        (**self).subscribe(container, hook)
    }

    fn unsubscribe(&mut self, handle: HookHandle) {
        (**self).unsubscribe(handle)
    }

    fn remove_item(&mut self, item: ItemId) {
        (**self).remove_item(item)
    }

    fn give_item(&mut self, actor: &ActorId, item: ResourceId, amount: u32, skin: SkinId) -> bool {
        (**self).give_item(actor, item, amount, skin)
    }

    fn send_message(&mut self, actor: &ActorId, message: &str) {
        (**self).send_message(actor, message)
    }

    fn has_permission(&self, actor: &ActorId, permission: &str) -> bool {
        (**self).has_permission(actor, permission)
    }
}
