use super::latency::Latency;
use crate::domain::history::{TransactionKind, TransactionRecord};
use crate::domain::point::{Points, UserBalance, UserId};
use crate::domain::ports::{BalanceStore, HistoryLog};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// A thread-safe in-memory store for user balances.
///
/// Uses `Arc<RwLock<HashMap<UserId, UserBalance>>>` so reads and writes for
/// different users are safe without the per-user lock. Writes are delayed by
/// the configured [`Latency`].
#[derive(Default, Clone)]
pub struct InMemoryBalanceStore {
    balances: Arc<RwLock<HashMap<UserId, UserBalance>>>,
    latency: Latency,
}

impl InMemoryBalanceStore {
    /// Creates a new, empty store without simulated latency.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Latency) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }
}

#[async_trait]
impl BalanceStore for InMemoryBalanceStore {
    async fn get(&self, user_id: UserId) -> Result<Option<UserBalance>> {
        let balances = self.balances.read().await;
        Ok(balances.get(&user_id).cloned())
    }

    async fn upsert(&self, user_id: UserId, points: Points) -> Result<UserBalance> {
        self.latency.pause().await;
        let balance = UserBalance::new(user_id, points);
        let mut balances = self.balances.write().await;
        balances.insert(user_id, balance.clone());
        tracing::debug!(user_id, points = points.value(), "balance written");
        Ok(balance)
    }
}

/// A thread-safe, append-only in-memory history log.
///
/// Sequence ids come from one counter shared by every user and start at 1.
/// The id is taken while the write lock is held, so the stored order always
/// matches the sequence order.
#[derive(Clone)]
pub struct InMemoryHistoryLog {
    records: Arc<RwLock<Vec<TransactionRecord>>>,
    next_sequence: Arc<AtomicU64>,
    latency: Latency,
}

impl Default for InMemoryHistoryLog {
    fn default() -> Self {
        Self {
            records: Arc::default(),
            next_sequence: Arc::new(AtomicU64::new(1)),
            latency: Latency::none(),
        }
    }
}

impl InMemoryHistoryLog {
    /// Creates a new, empty log without simulated latency.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Latency) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }
}

#[async_trait]
impl HistoryLog for InMemoryHistoryLog {
    async fn append(
        &self,
        user_id: UserId,
        resulting_balance: Points,
        kind: TransactionKind,
        timestamp: u64,
    ) -> Result<TransactionRecord> {
        self.latency.pause().await;
        let mut records = self.records.write().await;
        let record = TransactionRecord {
            sequence_id: self.next_sequence.fetch_add(1, Ordering::SeqCst),
            user_id,
            resulting_balance,
            kind,
            timestamp,
        };
        records.push(record.clone());
        tracing::debug!(
            user_id,
            sequence_id = record.sequence_id,
            kind = kind.verb(),
            "history appended"
        );
        Ok(record)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<TransactionRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }
}
