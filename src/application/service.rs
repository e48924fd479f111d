use crate::domain::history::{TransactionKind, TransactionRecord};
use crate::domain::point::{Amount, Points, UserBalance, UserId, validate_user_id};
use crate::domain::ports::{BalanceStoreBox, HistoryLogBox};
use crate::error::{PointError, Result};

/// Business rules for reading and moving points.
///
/// `BalanceService` validates requests, checks sufficiency, computes the new
/// balance and records history against the two stores. It performs its
/// read-then-write without synchronization of its own; callers that mutate
/// concurrently must serialize per user (see `PointOrchestrator`).
pub struct BalanceService {
    balances: BalanceStoreBox,
    history: HistoryLogBox,
}

impl BalanceService {
    /// Creates a new `BalanceService` instance.
    ///
    /// # Arguments
    ///
    /// * `balances` - The store holding the current balance per user.
    /// * `history` - The append-only log of point transactions.
    pub fn new(balances: BalanceStoreBox, history: HistoryLogBox) -> Self {
        Self { balances, history }
    }

    pub async fn get_balance(&self, user_id: UserId) -> Result<UserBalance> {
        validate_user_id(user_id)?;
        self.balances
            .get(user_id)
            .await?
            .ok_or(PointError::UserNotFound(user_id))
    }

    pub async fn get_history(&self, user_id: UserId) -> Result<Vec<TransactionRecord>> {
        validate_user_id(user_id)?;
        let records = self.history.list_by_user(user_id).await?;
        if records.is_empty() {
            return Err(PointError::UserNotFound(user_id));
        }
        Ok(records)
    }

    /// Adds points to a user's balance.
    ///
    /// A user without a balance record starts from zero, so the first charge
    /// initializes the user.
    pub async fn charge(&self, user_id: UserId, amount: i64) -> Result<UserBalance> {
        validate_user_id(user_id)?;
        let amount = Amount::new(amount, TransactionKind::Charge)?;

        let current = self
            .balances
            .get(user_id)
            .await?
            .map(|balance| balance.points)
            .unwrap_or(Points::ZERO);
        let new_points = current.charge(amount)?;

        self.apply(user_id, new_points, TransactionKind::Charge).await
    }

    /// Deducts points from a user's balance.
    ///
    /// Fails with `UserNotFound` if the user was never charged and with
    /// `InsufficientBalance` if the amount exceeds the balance. Nothing is
    /// written on failure.
    pub async fn use_points(&self, user_id: UserId, amount: i64) -> Result<UserBalance> {
        validate_user_id(user_id)?;
        let amount = Amount::new(amount, TransactionKind::Use)?;

        let current = self
            .balances
            .get(user_id)
            .await?
            .ok_or(PointError::UserNotFound(user_id))?;
        let new_points = current.points.spend(amount)?;

        self.apply(user_id, new_points, TransactionKind::Use).await
    }

    async fn apply(
        &self,
        user_id: UserId,
        new_points: Points,
        kind: TransactionKind,
    ) -> Result<UserBalance> {
        let updated = self.balances.upsert(user_id, new_points).await?;
        self.history
            .append(user_id, updated.points, kind, updated.last_updated)
            .await?;
        Ok(updated)
    }
}
