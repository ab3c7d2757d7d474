//! Admission policy - accept or reject an incoming transfer
//!
//! The limit check reads the last published [`AggregateSnapshot`], never the
//! live log. It also ignores the incoming amount: an actor below the limit
//! at the last summary may push past it with one large deposit, and only the
//! next attempt is then rejected. Both are accepted staleness, not bugs.

use depositbox_core::{ActorId, DepositBoxConfig, ResourceId};
use depositbox_summary::AggregateSnapshot;
use strum_macros::IntoStaticStr;

/// Why a transfer was refused
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// Item is not the tracked resource
    NotTrackedResource {
        expected: ResourceId,
        actual: ResourceId,
    },

    /// Item has no resolvable owner
    NoActor,

    /// Actor's snapshot total is already at or above the limit
    LimitExceeded { total: u64, limit: u64 },
}

impl RejectReason {
    /// Stable short code
    pub fn code(&self) -> &'static str {
        self.into()
    }
}

/// Outcome of an admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionDecision {
    Accept,
    Reject(RejectReason),
}

impl AdmissionDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AdmissionDecision::Accept)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, AdmissionDecision::Reject(_))
    }

    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            AdmissionDecision::Accept => None,
            AdmissionDecision::Reject(reason) => Some(reason),
        }
    }
}

/// Per-actor historical deposit limit
#[derive(Debug, Clone)]
pub struct AdmissionPolicy {
    tracked_resource: ResourceId,
    max_deposit_limit: u64,
}

impl AdmissionPolicy {
    pub fn new(tracked_resource: ResourceId, max_deposit_limit: u64) -> Self {
        Self {
            tracked_resource,
            max_deposit_limit,
        }
    }

    pub fn from_config(config: &DepositBoxConfig) -> Self {
        Self::new(config.tracked_resource, config.max_deposit_limit)
    }

    pub fn tracked_resource(&self) -> ResourceId {
        self.tracked_resource
    }

    pub fn max_deposit_limit(&self) -> u64 {
        self.max_deposit_limit
    }

    /// Decide whether a transfer may enter a managed container.
    ///
    /// Checks run in order: resource type, actor, snapshot total.
    pub fn should_accept(
        &self,
        snapshot: &AggregateSnapshot,
        actor: Option<&ActorId>,
        incoming_amount: u64,
        item_resource: ResourceId,
    ) -> AdmissionDecision {
        if item_resource != self.tracked_resource {
            return AdmissionDecision::Reject(RejectReason::NotTrackedResource {
                expected: self.tracked_resource,
                actual: item_resource,
            });
        }

        let Some(actor) = actor else {
            return AdmissionDecision::Reject(RejectReason::NoActor);
        };

        let total = snapshot.total_for(actor);
        if total >= self.max_deposit_limit {
            tracing::debug!(
                actor = %actor,
                total,
                limit = self.max_deposit_limit,
                "Deposit limit reached on last snapshot"
            );
            return AdmissionDecision::Reject(RejectReason::LimitExceeded {
                total,
                limit: self.max_deposit_limit,
            });
        }

        tracing::debug!(actor = %actor, total, incoming_amount, "Deposit admitted");
        AdmissionDecision::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depositbox_summary::ActorSummary;

    const SCRAP: ResourceId = ResourceId(-932_201_673);

    fn policy() -> AdmissionPolicy {
        AdmissionPolicy::new(SCRAP, 1000)
    }

    fn snapshot_with(actor: &str, total: u64) -> AggregateSnapshot {
        let mut snapshot = AggregateSnapshot::new();
        snapshot.insert(
            ActorId::from(actor),
            ActorSummary {
                total_deposited: total,
                percentage: Default::default(),
                sats_reward: 0,
            },
        );
        snapshot
    }

    #[test]
    fn test_wrong_resource_rejected_first() {
        let decision = policy().should_accept(
            &AggregateSnapshot::new(),
            None,
            10,
            ResourceId(1),
        );

        assert_eq!(
            decision,
            AdmissionDecision::Reject(RejectReason::NotTrackedResource {
                expected: SCRAP,
                actual: ResourceId(1),
            })
        );
    }

    #[test]
    fn test_no_actor_rejected() {
        let decision = policy().should_accept(&AggregateSnapshot::new(), None, 10, SCRAP);
        assert_eq!(decision, AdmissionDecision::Reject(RejectReason::NoActor));
        assert_eq!(decision.reason().unwrap().code(), "NO_ACTOR");
    }

    #[test]
    fn test_unknown_actor_accepted() {
        let actor = ActorId::from("A");
        let decision = policy().should_accept(&AggregateSnapshot::new(), Some(&actor), 10, SCRAP);
        assert!(decision.is_accepted());
    }

    #[test]
    fn test_below_limit_accepts_oversized_deposit() {
        let actor = ActorId::from("A");
        let snapshot = snapshot_with("A", 950);

        let decision = policy().should_accept(&snapshot, Some(&actor), 500, SCRAP);
        assert!(decision.is_accepted());
    }

    #[test]
    fn test_at_limit_rejected_regardless_of_amount() {
        let actor = ActorId::from("A");
        let snapshot = snapshot_with("A", 1000);

        for amount in [1, 500, 10_000] {
            let decision = policy().should_accept(&snapshot, Some(&actor), amount, SCRAP);
            assert_eq!(
                decision,
                AdmissionDecision::Reject(RejectReason::LimitExceeded {
                    total: 1000,
                    limit: 1000,
                })
            );
        }
    }

    #[test]
    fn test_other_actors_unaffected() {
        let actor = ActorId::from("B");
        let snapshot = snapshot_with("A", 5000);

        assert!(policy()
            .should_accept(&snapshot, Some(&actor), 1, SCRAP)
            .is_accepted());
    }

    #[test]
    fn test_reject_codes() {
        let reason = RejectReason::LimitExceeded { total: 1, limit: 1 };
        assert_eq!(reason.code(), "LIMIT_EXCEEDED");

        let reason = RejectReason::NotTrackedResource {
            expected: SCRAP,
            actual: ResourceId(0),
        };
        assert_eq!(reason.code(), "NOT_TRACKED_RESOURCE");
    }
}
