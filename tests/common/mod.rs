#![allow(dead_code)]

use std::io::{Error, Write};
use tempfile::NamedTempFile;
use userpoints::application::orchestrator::PointOrchestrator;
use userpoints::infrastructure::in_memory::{InMemoryBalanceStore, InMemoryHistoryLog};
use userpoints::infrastructure::latency::Latency;

pub fn orchestrator() -> PointOrchestrator {
    orchestrator_with_latency(Latency::none())
}

pub fn orchestrator_with_latency(latency: Latency) -> PointOrchestrator {
    orchestrator_with_latencies(latency, latency)
}

pub fn orchestrator_with_latencies(balances: Latency, history: Latency) -> PointOrchestrator {
    PointOrchestrator::new(
        Box::new(InMemoryBalanceStore::with_latency(balances)),
        Box::new(InMemoryHistoryLog::with_latency(history)),
    )
}

/// Writes a commands CSV with the standard header followed by `rows`.
pub fn commands_file(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "op, user, amount")?;
    for row in rows {
        writeln!(file, "{}", row)?;
    }
    file.flush()?;
    Ok(file)
}
