use super::history::{TransactionKind, TransactionRecord};
use super::point::{Points, UserBalance, UserId};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait BalanceStore: Send + Sync {
    async fn get(&self, user_id: UserId) -> Result<Option<UserBalance>>;
    /// Replaces the stored balance and its timestamp, creating it if absent.
    async fn upsert(&self, user_id: UserId, points: Points) -> Result<UserBalance>;
}

#[async_trait]
pub trait HistoryLog: Send + Sync {
    /// Assigns the next global sequence id and stores the record.
    async fn append(
        &self,
        user_id: UserId,
        resulting_balance: Points,
        kind: TransactionKind,
        timestamp: u64,
    ) -> Result<TransactionRecord>;
    /// Records of one user in insertion order; empty if the user has none.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<TransactionRecord>>;
}

pub type BalanceStoreBox = Box<dyn BalanceStore>;
pub type HistoryLogBox = Box<dyn HistoryLog>;
