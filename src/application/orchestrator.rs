use super::lock::LockRegistry;
use super::service::BalanceService;
use crate::domain::history::TransactionRecord;
use crate::domain::point::{UserBalance, UserId, validate_user_id};
use crate::domain::ports::{BalanceStoreBox, HistoryLogBox};
use crate::error::Result;
use std::sync::Arc;

/// The external entry point for point operations.
///
/// Charges and uses run inside the per-user slot of a [`LockRegistry`], so at
/// most one mutation per user is in flight; a second concurrent mutation for
/// the same user fails fast with `LockContention`. An admitted mutation runs
/// to completion even if the caller stops waiting for it, so balance and
/// history are never left half-written. Reads bypass the registry.
/// Share it between tasks behind an `Arc`.
pub struct PointOrchestrator {
    service: Arc<BalanceService>,
    locks: LockRegistry<UserId>,
}

impl PointOrchestrator {
    pub fn new(balances: BalanceStoreBox, history: HistoryLogBox) -> Self {
        Self {
            service: Arc::new(BalanceService::new(balances, history)),
            locks: LockRegistry::new(),
        }
    }

    pub async fn get_balance(&self, user_id: UserId) -> Result<UserBalance> {
        let balance = self.service.get_balance(user_id).await?;
        tracing::info!(user_id, points = balance.points.value(), "balance read");
        Ok(balance)
    }

    pub async fn get_history(&self, user_id: UserId) -> Result<Vec<TransactionRecord>> {
        let history = self.service.get_history(user_id).await?;
        tracing::info!(user_id, entries = history.len(), "history read");
        Ok(history)
    }

    pub async fn charge(&self, user_id: UserId, amount: i64) -> Result<UserBalance> {
        // Invalid ids never get a slot.
        validate_user_id(user_id)?;
        let service = Arc::clone(&self.service);
        let balance = self
            .locks
            .run_exclusive(user_id, move || async move {
                service.charge(user_id, amount).await
            })
            .await?;
        tracing::info!(
            user_id,
            amount,
            points = balance.points.value(),
            "points charged"
        );
        Ok(balance)
    }

    pub async fn use_points(&self, user_id: UserId, amount: i64) -> Result<UserBalance> {
        // Invalid ids never get a slot.
        validate_user_id(user_id)?;
        let service = Arc::clone(&self.service);
        let balance = self
            .locks
            .run_exclusive(user_id, move || async move {
                service.use_points(user_id, amount).await
            })
            .await?;
        tracing::info!(
            user_id,
            amount,
            points = balance.points.value(),
            "points used"
        );
        Ok(balance)
    }

    /// Number of per-user slots created so far.
    pub async fn tracked_users(&self) -> usize {
        self.locks.len().await
    }
}
