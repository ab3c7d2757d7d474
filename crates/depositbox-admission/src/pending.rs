//! Pending transfers - bridge between the admission hook and the commit hook
//!
//! When a transfer is admitted we remember which actor owns the item; when
//! the host later reports the item as added, the entry is resolved and
//! removed. If the host cancels after admission the commit never comes, so
//! entries older than `max_age` are swept.

use chrono::{DateTime, Utc};
use depositbox_core::{ActorId, ItemId};
use std::collections::HashMap;
use std::time::Duration;

/// An admitted transfer waiting for its commit event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransfer {
    pub actor: ActorId,
    pub recorded_at: DateTime<Utc>,
}

impl PendingTransfer {
    /// Check if the entry is at least `max_age` old at `now`
    pub fn is_expired(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        (now - self.recorded_at)
            .to_std()
            .map(|age| age >= max_age)
            .unwrap_or(false)
    }
}

/// In-memory item -> actor correlation table for one container binding
#[derive(Debug)]
pub struct PendingTransfers {
    entries: HashMap<ItemId, PendingTransfer>,
    max_age: Duration,
}

impl PendingTransfers {
    pub fn new(max_age: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            max_age,
        }
    }

    /// Associate an item with its depositing actor.
    ///
    /// Last writer wins; returns the actor that was overwritten, if any.
    pub fn record(&mut self, item: ItemId, actor: ActorId) -> Option<ActorId> {
        self.record_at(item, actor, Utc::now())
    }

    /// Record at a specific time (for tests)
    pub fn record_at(
        &mut self,
        item: ItemId,
        actor: ActorId,
        now: DateTime<Utc>,
    ) -> Option<ActorId> {
        self.entries
            .insert(
                item,
                PendingTransfer {
                    actor,
                    recorded_at: now,
                },
            )
            .map(|previous| previous.actor)
    }

    /// Remove and return the actor for an item, if one is pending
    pub fn resolve(&mut self, item: ItemId) -> Option<ActorId> {
        self.entries.remove(&item).map(|pending| pending.actor)
    }

    /// Evict entries older than `max_age`, returning what was evicted
    pub fn sweep_expired(&mut self) -> Vec<(ItemId, PendingTransfer)> {
        self.sweep_expired_at(Utc::now())
    }

    pub fn sweep_expired_at(&mut self, now: DateTime<Utc>) -> Vec<(ItemId, PendingTransfer)> {
        let expired: Vec<ItemId> = self
            .entries
            .iter()
            .filter(|(_, pending)| pending.is_expired(self.max_age, now))
            .map(|(item, _)| *item)
            .collect();

        let mut evicted = Vec::with_capacity(expired.len());
        for item in expired {
            if let Some(pending) = self.entries.remove(&item) {
                tracing::warn!(
                    item = %item,
                    actor = %pending.actor,
                    "Evicting admitted transfer that was never committed"
                );
                evicted.push((item, pending));
            }
        }
        evicted
    }

    /// Drop every pending entry (binding teardown)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.entries.contains_key(&item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn table() -> PendingTransfers {
        PendingTransfers::new(Duration::from_secs(300))
    }

    #[test]
    fn test_record_then_resolve_once() {
        let mut pending = table();
        pending.record(ItemId(7), ActorId::from("A"));

        assert_eq!(pending.resolve(ItemId(7)), Some(ActorId::from("A")));
        assert_eq!(pending.resolve(ItemId(7)), None);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_resolve_without_record_is_absent() {
        let mut pending = table();
        assert_eq!(pending.resolve(ItemId(1)), None);
    }

    #[test]
    fn test_last_writer_wins() {
        let mut pending = table();
        assert_eq!(pending.record(ItemId(7), ActorId::from("A")), None);
        assert_eq!(
            pending.record(ItemId(7), ActorId::from("B")),
            Some(ActorId::from("A"))
        );

        assert_eq!(pending.len(), 1);
        assert_eq!(pending.resolve(ItemId(7)), Some(ActorId::from("B")));
    }

    #[test]
    fn test_items_are_independent() {
        let mut pending = table();
        pending.record(ItemId(1), ActorId::from("A"));
        pending.record(ItemId(2), ActorId::from("B"));

        assert_eq!(pending.resolve(ItemId(2)), Some(ActorId::from("B")));
        assert!(pending.contains(ItemId(1)));
    }

    #[test]
    fn test_sweep_evicts_only_old_entries() {
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut pending = table();

        pending.record_at(ItemId(1), ActorId::from("A"), t0);
        pending.record_at(ItemId(2), ActorId::from("B"), t0 + chrono::Duration::seconds(200));

        let evicted = pending.sweep_expired_at(t0 + chrono::Duration::seconds(300));

        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].0, ItemId(1));
        assert_eq!(evicted[0].1.actor, ActorId::from("A"));
        assert!(pending.contains(ItemId(2)));
        assert!(!pending.contains(ItemId(1)));
    }

    #[test]
    fn test_entry_from_the_future_is_not_expired() {
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let entry = PendingTransfer {
            actor: ActorId::from("A"),
            recorded_at: t0 + chrono::Duration::seconds(60),
        };
        assert!(!entry.is_expired(Duration::from_secs(1), t0));
    }
}
