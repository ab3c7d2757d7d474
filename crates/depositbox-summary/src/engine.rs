//! Aggregation & allocation engine
//!
//! Replays the deposit log into per-actor totals and splits a prize pool
//! proportionally:
//!
//! ```text
//! percentage = total / grand_total * 100          (0 when grand_total = 0)
//! reward     = round_half_away(total * prize_pool / grand_total)
//! ```
//!
//! The reward is rounded from the exact ratio with integer arithmetic, so a
//! summary is reproducible bit for bit. The rewards may miss the prize pool
//! by at most one unit per actor; the remainder is not redistributed.

use crate::error::{SummaryError, SummaryResult};
use crate::snapshot::{ActorSummary, AggregateSnapshot};
use crate::store::SnapshotStore;
use depositbox_core::{ActorId, DepositRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Result of one aggregation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub prize_pool: u64,
    pub grand_total: u64,
    pub snapshot: AggregateSnapshot,
}

impl Summary {
    /// Sum of all allocated rewards.
    ///
    /// Rounding can push the sum past `prize_pool` by one per actor, so it is
    /// accumulated in `u128`.
    pub fn reward_total(&self) -> u128 {
        self.snapshot
            .iter()
            .fold(0u128, |acc, (_, s)| acc + u128::from(s.sats_reward))
    }

    pub fn actor_count(&self) -> usize {
        self.snapshot.len()
    }
}

/// Compute totals and rewards for a log. Pure; touches no storage.
pub fn aggregate(records: &[DepositRecord], prize_pool: u64) -> SummaryResult<Summary> {
    if prize_pool == 0 {
        return Err(SummaryError::InvalidPrizePool);
    }

    let mut totals: BTreeMap<&ActorId, u64> = BTreeMap::new();
    let mut grand_total: u64 = 0;

    for record in records {
        let amount = record.amount.value();
        let total = totals.entry(&record.actor_id).or_insert(0);
        *total = total.checked_add(amount).ok_or(SummaryError::Overflow)?;
        grand_total = grand_total
            .checked_add(amount)
            .ok_or(SummaryError::Overflow)?;
    }

    let mut snapshot = AggregateSnapshot::new();
    for (actor, total) in totals {
        if total == 0 {
            continue;
        }
        snapshot.insert(
            actor.clone(),
            ActorSummary {
                total_deposited: total,
                percentage: percentage(total, grand_total),
                sats_reward: reward(total, grand_total, prize_pool),
            },
        );
    }

    Ok(Summary {
        prize_pool,
        grand_total,
        snapshot,
    })
}

fn percentage(total: u64, grand_total: u64) -> Decimal {
    if grand_total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(total) * Decimal::ONE_HUNDRED / Decimal::from(grand_total)
}

fn reward(total: u64, grand_total: u64, prize_pool: u64) -> u64 {
    if grand_total == 0 {
        return 0;
    }
    let numerator = u128::from(total) * u128::from(prize_pool);
    let denominator = u128::from(grand_total);
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    // half away from zero: round up when the remainder is at least half
    let rounded = if 2 * remainder >= denominator {
        quotient + 1
    } else {
        quotient
    };
    // total <= grand_total, so rounded <= prize_pool
    u64::try_from(rounded).unwrap_or(prize_pool)
}

/// Sole writer of the aggregate snapshot
pub struct SummaryEngine {
    store: SnapshotStore,
}

impl SummaryEngine {
    pub fn new(store: SnapshotStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Aggregate the full log, overwrite the persisted snapshot in all three
    /// representations, and return the summary.
    pub fn generate_summary(
        &self,
        records: &[DepositRecord],
        prize_pool: u64,
    ) -> SummaryResult<Summary> {
        let summary = aggregate(records, prize_pool)?;
        self.store.write(&summary)?;

        tracing::info!(
            prize_pool,
            grand_total = summary.grand_total,
            actors = summary.actor_count(),
            rewards = summary.reward_total(),
            "Deposit summary generated"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depositbox_core::{Amount, DataPaths};
    use rust_decimal_macros::dec;

    fn log(entries: &[(&str, u64)]) -> Vec<DepositRecord> {
        entries
            .iter()
            .map(|(actor, amount)| {
                DepositRecord::new(ActorId::from(*actor), Amount::new(*amount).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_proportional_split() {
        let records = log(&[("A", 500), ("B", 300), ("A", 200)]);
        let summary = aggregate(&records, 1000).unwrap();

        assert_eq!(summary.grand_total, 1000);

        let a = summary.snapshot.get(&ActorId::from("A")).unwrap();
        assert_eq!(a.total_deposited, 700);
        assert_eq!(a.percentage, dec!(70));
        assert_eq!(a.sats_reward, 700);

        let b = summary.snapshot.get(&ActorId::from("B")).unwrap();
        assert_eq!(b.total_deposited, 300);
        assert_eq!(b.percentage, dec!(30));
        assert_eq!(b.sats_reward, 300);
    }

    #[test]
    fn test_empty_log() {
        let summary = aggregate(&[], 100_000).unwrap();

        assert_eq!(summary.grand_total, 0);
        assert!(summary.snapshot.is_empty());
        assert_eq!(summary.reward_total(), 0);
    }

    #[test]
    fn test_zero_prize_pool_rejected() {
        let records = log(&[("A", 1)]);
        assert!(matches!(
            aggregate(&records, 0),
            Err(SummaryError::InvalidPrizePool)
        ));
    }

    #[test]
    fn test_totals_conserve_log() {
        let records = log(&[("A", 3), ("B", 5), ("C", 7), ("A", 11), ("C", 13)]);
        let summary = aggregate(&records, 12_345).unwrap();

        let log_sum: u64 = records.iter().map(|r| r.amount.value()).sum();
        let actor_sum: u64 = summary.snapshot.iter().map(|(_, s)| s.total_deposited).sum();

        assert_eq!(summary.grand_total, log_sum);
        assert_eq!(actor_sum, summary.grand_total);
    }

    #[test]
    fn test_rounding_drift_is_bounded() {
        // Three equal shares of 100 -> 33.33.. each, 1 unit lost
        let records = log(&[("A", 1), ("B", 1), ("C", 1)]);
        let summary = aggregate(&records, 100).unwrap();

        assert_eq!(summary.reward_total(), 99);
        let drift = u128::from(summary.prize_pool).abs_diff(summary.reward_total());
        assert!(drift <= summary.actor_count() as u128);
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        // Each actor gets exactly 0.5 of a unit
        let records = log(&[("A", 1), ("B", 1)]);
        let summary = aggregate(&records, 1).unwrap();

        assert_eq!(summary.snapshot.get(&ActorId::from("A")).unwrap().sats_reward, 1);
        assert_eq!(summary.snapshot.get(&ActorId::from("B")).unwrap().sats_reward, 1);
        assert_eq!(summary.reward_total(), 2);
    }

    #[test]
    fn test_repeated_aggregation_is_identical() {
        let records = log(&[("A", 2), ("B", 1)]);
        let first = aggregate(&records, 1000).unwrap();
        let second = aggregate(&records, 1000).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_large_values_do_not_overflow_reward() {
        let records = log(&[("A", u64::MAX / 2), ("B", u64::MAX / 2)]);
        let summary = aggregate(&records, u64::MAX).unwrap();
        let a = summary.snapshot.get(&ActorId::from("A")).unwrap();
        assert_eq!(a.percentage, dec!(50));
        assert_eq!(a.sats_reward, u64::MAX / 2 + 1);
    }

    #[test]
    fn test_reward_total_past_u64_range() {
        let dir = tempfile::tempdir().unwrap();
        let engine = SummaryEngine::new(SnapshotStore::new(DataPaths::new(dir.path())));

        // each half rounds up, so the rewards sum to u64::MAX + 1
        let summary = engine
            .generate_summary(&log(&[("A", 1), ("B", 1)]), u64::MAX)
            .unwrap();

        assert_eq!(summary.reward_total(), u128::from(u64::MAX) + 1);
    }

    #[test]
    fn test_grand_total_overflow_is_an_error() {
        let records = log(&[("A", u64::MAX), ("B", 1)]);
        assert!(matches!(aggregate(&records, 1), Err(SummaryError::Overflow)));
    }
}
