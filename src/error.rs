use crate::domain::point::UserId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PointError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("no point record for user {0}")]
    UserNotFound(UserId),
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u64, available: u64 },
    #[error("a point mutation for user {0} is already in flight")]
    LockContention(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PointError {
    /// Stable label used when rendering outcomes.
    pub fn kind(&self) -> &'static str {
        match self {
            PointError::InvalidArgument(_) => "invalid_argument",
            PointError::UserNotFound(_) => "user_not_found",
            PointError::InsufficientBalance { .. } => "insufficient_balance",
            PointError::LockContention(_) => "lock_contention",
            PointError::Storage(_) => "storage",
            PointError::Task(_) => "task",
            PointError::Csv(_) => "csv",
            PointError::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, PointError>;
