use super::csv::command_reader::{Command, Operation};
use super::csv::outcome_writer::Outcome;
use crate::application::orchestrator::PointOrchestrator;
use crate::error::{PointError, Result};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Executes one command against the orchestrator and renders its result.
pub async fn execute(orchestrator: &PointOrchestrator, line: usize, command: Command) -> Outcome {
    let mut outcome = Outcome {
        line,
        op: command.op,
        user: command.user,
        status: "ok".to_string(),
        points: None,
        entries: None,
        message: None,
    };

    let result = match command.op {
        Operation::Balance => orchestrator
            .get_balance(command.user)
            .await
            .map(|balance| outcome.points = Some(balance.points.value())),
        Operation::History => orchestrator.get_history(command.user).await.map(|history| {
            outcome.points = history.last().map(|record| record.resulting_balance.value());
            outcome.entries = Some(history.len());
        }),
        Operation::Charge => match required_amount(&command) {
            Ok(amount) => orchestrator
                .charge(command.user, amount)
                .await
                .map(|balance| outcome.points = Some(balance.points.value())),
            Err(e) => Err(e),
        },
        Operation::Use => match required_amount(&command) {
            Ok(amount) => orchestrator
                .use_points(command.user, amount)
                .await
                .map(|balance| outcome.points = Some(balance.points.value())),
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        tracing::warn!(line, user_id = command.user, error = %e, "command failed");
        outcome.status = e.kind().to_string();
        outcome.message = Some(e.to_string());
    }
    outcome
}

/// Runs commands one after another in input order.
pub async fn run_sequential(
    orchestrator: &PointOrchestrator,
    commands: Vec<(usize, Command)>,
) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(commands.len());
    for (line, command) in commands {
        outcomes.push(execute(orchestrator, line, command).await);
    }
    outcomes
}

/// Spawns every command as its own task and returns outcomes sorted by line.
pub async fn run_concurrent(
    orchestrator: Arc<PointOrchestrator>,
    commands: Vec<(usize, Command)>,
) -> Result<Vec<Outcome>> {
    let mut tasks = JoinSet::new();
    for (line, command) in commands {
        let orchestrator = orchestrator.clone();
        tasks.spawn(async move { execute(&orchestrator, line, command).await });
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined?);
    }
    outcomes.sort_by_key(|outcome| outcome.line);
    Ok(outcomes)
}

fn required_amount(command: &Command) -> Result<i64> {
    command.amount.ok_or_else(|| {
        PointError::InvalidArgument(format!(
            "amount is required for {}",
            match command.op {
                Operation::Use => "use",
                _ => "charge",
            }
        ))
    })
}
