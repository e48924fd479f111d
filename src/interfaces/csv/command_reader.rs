use crate::domain::point::UserId;
use crate::error::{PointError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Charge,
    Use,
    Balance,
    History,
}

/// One requested operation. `amount` is only meaningful for charge and use.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct Command {
    pub op: Operation,
    pub user: UserId,
    #[serde(default)]
    pub amount: Option<i64>,
}

/// Reads commands from a CSV source with an `op, user, amount` header.
///
/// Whitespace is trimmed and short records (reads without an amount column)
/// are accepted.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields commands paired with their 1-based data line number.
    pub fn commands(self) -> impl Iterator<Item = (usize, Result<Command>)> {
        self.reader
            .into_deserialize()
            .enumerate()
            .map(|(index, result)| (index + 1, result.map_err(PointError::from)))
    }
}
