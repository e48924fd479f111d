use crate::domain::history::TransactionKind;
use crate::error::{PointError, Result};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier of a point owner. Only positive values are valid.
pub type UserId = i64;

/// A non-negative point total.
///
/// Wraps `u64` so balances can never go below zero; all arithmetic is checked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Points(u64);

impl Points {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Adds a charge, failing instead of wrapping on overflow.
    pub fn charge(self, amount: Amount) -> Result<Self> {
        self.0.checked_add(amount.value()).map(Self).ok_or_else(|| {
            PointError::InvalidArgument(format!(
                "charge of {} points would overflow balance of {}",
                amount.value(),
                self.0
            ))
        })
    }

    /// Deducts a use if the balance covers it.
    pub fn spend(self, amount: Amount) -> Result<Self> {
        self.0
            .checked_sub(amount.value())
            .map(Self)
            .ok_or(PointError::InsufficientBalance {
                requested: amount.value(),
                available: self.0,
            })
    }
}

/// A strictly positive number of points moved by a charge or a use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(u64);

impl Amount {
    /// Validates a raw request amount; the error message names the operation.
    pub fn new(value: i64, kind: TransactionKind) -> Result<Self> {
        match u64::try_from(value) {
            Ok(points) if points > 0 => Ok(Self(points)),
            _ => Err(PointError::InvalidArgument(format!(
                "points to {} must be positive, got {}",
                kind.verb(),
                value
            ))),
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Rejects non-positive user ids before any store is touched.
pub fn validate_user_id(user_id: UserId) -> Result<()> {
    if user_id > 0 {
        Ok(())
    } else {
        Err(PointError::InvalidArgument(format!(
            "user id must be positive, got {}",
            user_id
        )))
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

/// The current point balance of one user.
///
/// Exactly one record exists per user once they have been charged; absence
/// means the user has never been charged.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct UserBalance {
    pub user_id: UserId,
    pub points: Points,
    /// Time of the last write, in milliseconds since the Unix epoch.
    pub last_updated: u64,
}

impl UserBalance {
    pub fn new(user_id: UserId, points: Points) -> Self {
        Self {
            user_id,
            points,
            last_updated: now_millis(),
        }
    }
}
