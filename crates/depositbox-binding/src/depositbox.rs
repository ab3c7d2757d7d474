//! DepositBox - the subsystem object graph
//!
//! One `DepositBox` owns the log, the summary engine, the published snapshot
//! and every container binding. The host drives it by forwarding container
//! lifecycle events and the two transfer hooks; nothing is reachable through
//! a global.

use crate::binding::ContainerBinding;
use crate::error::BindingResult;
use crate::host::{ContainerInfo, Host, ItemChange, TransferAttempt};
use crate::messages::Message;
use chrono::{DateTime, Utc};
use depositbox_admission::{AdmissionDecision, AdmissionPolicy, RejectReason};
use depositbox_core::{
    ActorId, Amount, ContainerId, DataPaths, DepositBoxConfig, DepositRecord,
};
use depositbox_log::DepositLogStore;
use depositbox_summary::{AggregateSnapshot, SnapshotCell, SnapshotStore, Summary, SummaryEngine};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Result of a committed deposit reaching the item-added hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositOutcome {
    pub actor: ActorId,
    pub amount: u64,
    /// False when the log append failed and the deposit was lost
    pub persisted: bool,
}

pub struct DepositBox<H: Host> {
    host: H,
    config: DepositBoxConfig,
    policy: AdmissionPolicy,
    log: DepositLogStore,
    summary: SummaryEngine,
    snapshot: SnapshotCell,
    bindings: HashMap<ContainerId, ContainerBinding>,
    recovered_log: Option<PathBuf>,
}

impl<H: Host> DepositBox<H> {
    /// Open the log and snapshot under `paths`, then bind every managed
    /// container the host already knows about.
    ///
    /// A corrupt log is moved aside and replaced by an empty one; a corrupt
    /// snapshot is treated as empty.
    pub fn start(config: DepositBoxConfig, paths: DataPaths, host: H) -> BindingResult<Self> {
        let (log, recovered_log) = DepositLogStore::open_or_recover(paths.log_file())?;
        let store = SnapshotStore::new(paths);
        let snapshot = SnapshotCell::new(store.read_snapshot_or_empty());

        let mut dbox = Self {
            host,
            policy: AdmissionPolicy::from_config(&config),
            config,
            log,
            summary: SummaryEngine::new(store),
            snapshot,
            bindings: HashMap::new(),
            recovered_log,
        };

        let existing = dbox.host.containers();
        let mut bound = 0usize;
        for info in existing {
            if dbox.on_container_spawned(info) {
                bound += 1;
            }
        }

        tracing::info!(
            deposits = dbox.log.len(),
            snapshot_actors = dbox.snapshot.current().len(),
            bound,
            "DepositBox started"
        );

        Ok(dbox)
    }

    /// Bind a container if it carries the managed skin. Returns true if a new
    /// binding was created.
    pub fn on_container_spawned(&mut self, info: ContainerInfo) -> bool {
        if info.skin != self.config.container_skin {
            return false;
        }
        if self
            .bindings
            .get(&info.id)
            .is_some_and(|binding| binding.is_bound())
        {
            return false;
        }

        let mut binding = ContainerBinding::new(info.id, self.config.pending_max_age());
        if let Err(e) = binding.attach(&mut self.host) {
            tracing::error!(container = %info.id, error = %e, "Failed to bind deposit box");
            return false;
        }
        self.bindings.insert(info.id, binding);
        true
    }

    /// Unbind a container the host destroyed. Unknown containers are ignored.
    pub fn on_container_removed(&mut self, container: ContainerId) {
        if let Some(mut binding) = self.bindings.remove(&container) {
            binding.detach(&mut self.host);
        }
    }

    /// Pre-commit hook. `None` means the container is not managed here.
    pub fn can_accept(
        &mut self,
        container: ContainerId,
        attempt: &TransferAttempt,
    ) -> Option<AdmissionDecision> {
        self.can_accept_at(container, attempt, Utc::now())
    }

    pub fn can_accept_at(
        &mut self,
        container: ContainerId,
        attempt: &TransferAttempt,
        now: DateTime<Utc>,
    ) -> Option<AdmissionDecision> {
        let binding = self.bindings.get_mut(&container)?;
        if !binding.is_bound() {
            return None;
        }

        binding.pending_mut().sweep_expired_at(now);

        let snapshot = self.snapshot.current();
        let decision = self.policy.should_accept(
            &snapshot,
            attempt.owner.as_ref(),
            attempt.amount,
            attempt.resource,
        );

        match (&decision, attempt.owner.as_ref()) {
            (AdmissionDecision::Accept, Some(actor)) => {
                if let Some(previous) =
                    binding
                        .pending_mut()
                        .record_at(attempt.item, actor.clone(), now)
                {
                    tracing::debug!(
                        item = %attempt.item,
                        previous = %previous,
                        actor = %actor,
                        "Pending transfer overwritten"
                    );
                }
            }
            (AdmissionDecision::Reject(reason), Some(actor)) => {
                let message = match reason {
                    RejectReason::NotTrackedResource { .. } => Some(Message::WrongItem),
                    RejectReason::LimitExceeded { total, limit } => Some(Message::LimitReached {
                        total: *total,
                        limit: *limit,
                    }),
                    RejectReason::NoActor => None,
                };
                if let Some(message) = message {
                    self.host.send_message(actor, &message.to_string());
                }
            }
            _ => {}
        }

        Some(decision)
    }

    /// Post-commit hook.
    ///
    /// Removals, other resources and items that were never admitted are
    /// ignored. An admitted item is appended to the log and then removed from
    /// the world; if the append fails the item is still removed and the
    /// deposit is lost.
    pub fn on_item_changed(
        &mut self,
        container: ContainerId,
        change: &ItemChange,
    ) -> Option<DepositOutcome> {
        if !change.added || change.resource != self.policy.tracked_resource() {
            return None;
        }

        let binding = self.bindings.get_mut(&container)?;
        let actor = binding.pending_mut().resolve(change.item)?;

        let persisted = match Amount::new(change.amount) {
            Ok(amount) => match self.log.append(DepositRecord::new(actor.clone(), amount)) {
                Ok(()) => {
                    tracing::info!(
                        actor = %actor,
                        amount = change.amount,
                        container = %container,
                        "Deposit recorded"
                    );
                    true
                }
                Err(e) => {
                    tracing::error!(
                        actor = %actor,
                        amount = change.amount,
                        container = %container,
                        error = %e,
                        "Deposit lost: log append failed after admission"
                    );
                    false
                }
            },
            Err(e) => {
                tracing::warn!(actor = %actor, item = %change.item, error = %e, "Ignoring empty deposit");
                false
            }
        };

        self.host.remove_item(change.item);

        if persisted {
            self.host.send_message(
                &actor,
                &Message::DepositRecorded {
                    amount: change.amount,
                }
                .to_string(),
            );
        }

        Some(DepositOutcome {
            actor,
            amount: change.amount,
            persisted,
        })
    }

    /// Aggregate the whole log, persist the snapshot and publish it to the
    /// admission check.
    pub fn generate_summary(&mut self, prize_pool: u64) -> BindingResult<Summary> {
        let summary = self
            .summary
            .generate_summary(self.log.records(), prize_pool)?;
        self.snapshot.publish(summary.snapshot.clone());
        Ok(summary)
    }

    /// Re-read the persisted snapshot and publish it. Parse failures publish
    /// an empty snapshot.
    pub fn reload_snapshot(&mut self) -> Arc<AggregateSnapshot> {
        let snapshot = self.summary.store().read_snapshot_or_empty();
        self.snapshot.publish(snapshot);
        self.snapshot.current()
    }

    /// Evict stale admitted transfers across all bindings
    pub fn sweep_orphans(&mut self) -> usize {
        self.sweep_orphans_at(Utc::now())
    }

    pub fn sweep_orphans_at(&mut self, now: DateTime<Utc>) -> usize {
        self.bindings
            .values_mut()
            .map(|binding| binding.pending_mut().sweep_expired_at(now).len())
            .sum()
    }

    /// Detach every binding. Called on drop as well.
    pub fn shutdown(&mut self) {
        if self.bindings.is_empty() {
            return;
        }
        let count = self.bindings.len();
        for (_, mut binding) in self.bindings.drain() {
            binding.detach(&mut self.host);
        }
        tracing::info!(bindings = count, "DepositBox shut down");
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &DepositBoxConfig {
        &self.config
    }

    pub fn policy(&self) -> &AdmissionPolicy {
        &self.policy
    }

    pub fn log(&self) -> &DepositLogStore {
        &self.log
    }

    pub fn snapshot(&self) -> Arc<AggregateSnapshot> {
        self.snapshot.current()
    }

    pub fn binding(&self, container: ContainerId) -> Option<&ContainerBinding> {
        self.bindings.get(&container)
    }

    pub fn bound_containers(&self) -> Vec<ContainerId> {
        let mut ids: Vec<ContainerId> = self.bindings.keys().copied().collect();
        ids.sort_by_key(|id| id.0);
        ids
    }

    /// Where the corrupt log was moved at startup, if it was
    pub fn recovered_log(&self) -> Option<&PathBuf> {
        self.recovered_log.as_ref()
    }
}

impl<H: Host> Drop for DepositBox<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
