//! User-facing chat messages

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    NoPermission,
    BoxGiven,
    DepositRecorded { amount: u64 },
    LimitReached { total: u64, limit: u64 },
    WrongItem,
    SummarySaved { prize_pool: u64 },
    SummaryNoPermission,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::NoPermission => f.write_str("You do not have permission to place this box."),
            Message::BoxGiven => f.write_str("You have received a Deposit Box."),
            Message::DepositRecorded { amount } => write!(
                f,
                "Your deposit of {amount} scrap has been recorded successfully."
            ),
            Message::LimitReached { total, limit } => write!(
                f,
                "Your total on the last leaderboard ({total} scrap) meets or exceeds the deposit \
                 limit of {limit}. You cannot deposit more until the next leaderboard update."
            ),
            Message::WrongItem => f.write_str("Only scrap can be deposited in this box."),
            Message::SummarySaved { prize_pool } => write!(
                f,
                "Deposit summary saved to data/DepositBox/ with prize pool: {prize_pool} sats"
            ),
            Message::SummaryNoPermission => {
                f.write_str("You do not have permission to run this command.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_filled() {
        assert_eq!(
            Message::DepositRecorded { amount: 250 }.to_string(),
            "Your deposit of 250 scrap has been recorded successfully."
        );
        let text = Message::LimitReached {
            total: 1200,
            limit: 1000,
        }
        .to_string();
        assert!(text.contains("(1200 scrap)"));
        assert!(text.contains("deposit limit of 1000."));
    }
}
