//! Amount - Positive integer quantity of the tracked resource
//!
//! Every deposit moves at least one unit. Zero-sized deposits are rejected
//! at the type level so the log never carries them.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when working with amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount must be positive")]
    Zero,
}

/// A positive quantity of the tracked resource.
///
/// # Invariant
/// The inner value is always >= 1. This is enforced by the constructor.
///
/// # Example
/// ```
/// use depositbox_core::Amount;
///
/// let amount = Amount::new(250).unwrap();
/// assert_eq!(amount.value(), 250);
///
/// // Zero amounts are rejected
/// assert!(Amount::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Amount(u64);

impl Amount {
    /// Create a new Amount.
    ///
    /// Returns an error if the value is zero.
    pub fn new(value: u64) -> Result<Self, AmountError> {
        if value == 0 {
            Err(AmountError::Zero)
        } else {
            Ok(Self(value))
        }
    }

    /// Get the inner value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for Amount {
    type Error = AmountError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(100).unwrap();
        assert_eq!(amount.value(), 100);
        assert_eq!(amount.to_string(), "100");
    }

    #[test]
    fn test_amount_zero_rejected() {
        assert_eq!(Amount::new(0), Err(AmountError::Zero));
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        let parsed: Result<Amount, _> = serde_json::from_str("0");
        assert!(parsed.is_err());

        let parsed: Amount = serde_json::from_str("42").unwrap();
        assert_eq!(parsed.value(), 42);
    }
}
