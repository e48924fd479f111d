//! Application layer containing the point business logic and its concurrency
//! control.
//!
//! `BalanceService` holds the rules for charging and using points,
//! `LockRegistry` serializes work per key, and `PointOrchestrator` combines
//! the two into the entry point used by the outer interfaces.

pub mod lock;
pub mod orchestrator;
pub mod service;
