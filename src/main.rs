use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use userpoints::application::orchestrator::PointOrchestrator;
use userpoints::domain::ports::{BalanceStoreBox, HistoryLogBox};
use userpoints::infrastructure::in_memory::{InMemoryBalanceStore, InMemoryHistoryLog};
use userpoints::infrastructure::latency::Latency;
use userpoints::interfaces::csv::command_reader::CommandReader;
use userpoints::interfaces::csv::outcome_writer::{OutcomeWriter, OutputFormat};
use userpoints::interfaces::runner;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input commands CSV file (`op, user, amount`)
    input: PathBuf,

    /// Upper bound of the random simulated store latency, in milliseconds. 0 disables it.
    #[arg(long, default_value_t = 0)]
    max_latency_ms: u64,

    /// Dispatch every command at once instead of one after another.
    #[arg(long)]
    concurrent: bool,

    /// Output format for command outcomes.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let latency = Latency::from_millis(cli.max_latency_ms);
    let balances: BalanceStoreBox = Box::new(InMemoryBalanceStore::with_latency(latency));
    let history: HistoryLogBox = Box::new(InMemoryHistoryLog::with_latency(latency));
    let orchestrator = Arc::new(PointOrchestrator::new(balances, history));

    let file = File::open(&cli.input).into_diagnostic()?;
    let mut commands = Vec::new();
    for (line, command) in CommandReader::new(file).commands() {
        match command {
            Ok(command) => commands.push((line, command)),
            Err(e) => tracing::error!(line, "Error reading command: {}", e),
        }
    }

    let outcomes = if cli.concurrent {
        runner::run_concurrent(orchestrator, commands)
            .await
            .into_diagnostic()?
    } else {
        runner::run_sequential(&orchestrator, commands).await
    };

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock(), cli.format);
    writer.write_outcomes(outcomes).into_diagnostic()?;

    Ok(())
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_ansi(false))
        .init();
}
