//! Aggregate snapshot - the last published per-actor view
//!
//! A snapshot is derived data: it can always be rebuilt by replaying the
//! deposit log. It is also deliberately stale. Limit checks read whatever
//! snapshot was last published, not the live log, so deposits made after
//! the last summary are invisible to admission until the next summary.

use depositbox_core::ActorId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One actor's row in the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSummary {
    pub total_deposited: u64,

    /// Share of the grand total, 0-100
    #[serde(default, with = "rust_decimal::serde::float")]
    pub percentage: Decimal,

    #[serde(default)]
    pub sats_reward: u64,
}

/// Mapping actorId -> summary row, ordered by actor id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateSnapshot {
    actors: BTreeMap<ActorId, ActorSummary>,
}

impl AggregateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, actor: ActorId, summary: ActorSummary) {
        self.actors.insert(actor, summary);
    }

    pub fn get(&self, actor: &ActorId) -> Option<&ActorSummary> {
        self.actors.get(actor)
    }

    /// Snapshot total for an actor; 0 if the actor never deposited
    pub fn total_for(&self, actor: &ActorId) -> u64 {
        self.actors
            .get(actor)
            .map(|s| s.total_deposited)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActorId, &ActorSummary)> {
        self.actors.iter()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

/// Holder of the currently published snapshot.
///
/// Readers get a cheap `Arc` to an immutable snapshot; publishing swaps the
/// whole value, so a reader never observes a half-written snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCell {
    current: Arc<AggregateSnapshot>,
}

impl SnapshotCell {
    pub fn new(snapshot: AggregateSnapshot) -> Self {
        Self {
            current: Arc::new(snapshot),
        }
    }

    /// The last published snapshot
    pub fn current(&self) -> Arc<AggregateSnapshot> {
        Arc::clone(&self.current)
    }

    /// Replace the published snapshot
    pub fn publish(&mut self, snapshot: AggregateSnapshot) {
        self.current = Arc::new(snapshot);
    }
}
