use super::command_reader::Operation;
use crate::domain::point::UserId;
use crate::error::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// The rendered result of one command.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct Outcome {
    pub line: usize,
    pub op: Operation,
    pub user: UserId,
    /// `ok`, or the kind of the error that ended the command.
    pub status: String,
    pub points: Option<u64>,
    pub entries: Option<usize>,
    pub message: Option<String>,
}

/// Writes outcomes as CSV rows or JSON lines.
pub struct OutcomeWriter<W: Write> {
    sink: Sink<W>,
}

enum Sink<W: Write> {
    Csv(csv::Writer<W>),
    Json(W),
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(destination: W, format: OutputFormat) -> Self {
        let sink = match format {
            OutputFormat::Csv => Sink::Csv(csv::Writer::from_writer(destination)),
            OutputFormat::Json => Sink::Json(destination),
        };
        Self { sink }
    }

    pub fn write_outcomes(&mut self, outcomes: impl IntoIterator<Item = Outcome>) -> Result<()> {
        for outcome in outcomes {
            match &mut self.sink {
                Sink::Csv(writer) => writer.serialize(&outcome)?,
                Sink::Json(writer) => {
                    serde_json::to_writer(&mut *writer, &outcome).map_err(std::io::Error::from)?;
                    writeln!(writer)?;
                }
            }
        }
        match &mut self.sink {
            Sink::Csv(writer) => writer.flush()?,
            Sink::Json(writer) => writer.flush()?,
        }
        Ok(())
    }
}
