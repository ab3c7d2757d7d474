//! DepositRecord - one durable deposit fact

use crate::amount::Amount;
use crate::ids::ActorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single accepted-and-committed deposit.
///
/// Immutable once written. Ordering in the log is append order; the
/// timestamp is informational and never used for ordering or dedup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRecord {
    #[serde(rename = "steamid")]
    pub actor_id: ActorId,

    pub timestamp: DateTime<Utc>,

    #[serde(rename = "amount_deposited")]
    pub amount: Amount,
}

impl DepositRecord {
    pub fn new(actor_id: ActorId, amount: Amount) -> Self {
        Self::at(actor_id, amount, Utc::now())
    }

    /// Create a record with an explicit timestamp (for replay and tests)
    pub fn at(actor_id: ActorId, amount: Amount, timestamp: DateTime<Utc>) -> Self {
        Self {
            actor_id,
            timestamp,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_wire_format() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let record = DepositRecord::at(ActorId::from("A"), Amount::new(500).unwrap(), ts);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["steamid"], "A");
        assert_eq!(json["amount_deposited"], 500);
        assert_eq!(json["timestamp"], "2025-03-01T12:00:00Z");
    }

    #[test]
    fn test_record_accepts_seven_digit_fraction() {
        let json = r#"{"steamid":"A","timestamp":"2025-03-01T12:00:00.1234567Z","amount_deposited":7}"#;
        let record: DepositRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount.value(), 7);
        assert_eq!(record.actor_id.as_str(), "A");
    }
}
