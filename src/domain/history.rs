use crate::domain::point::{Points, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Charge,
    Use,
}

impl TransactionKind {
    pub fn verb(&self) -> &'static str {
        match self {
            TransactionKind::Charge => "charge",
            TransactionKind::Use => "use",
        }
    }
}

/// An immutable entry of a user's point history.
///
/// `resulting_balance` is the balance after the transaction was applied, not
/// the amount moved.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct TransactionRecord {
    /// Global sequence number, strictly increasing across all users.
    pub sequence_id: u64,
    pub user_id: UserId,
    pub resulting_balance: Points,
    pub kind: TransactionKind,
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization() {
        let record = TransactionRecord {
            sequence_id: 3,
            user_id: 1,
            resulting_balance: Points::new(1500),
            kind: TransactionKind::Use,
            timestamp: 10,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "use");
        assert_eq!(json["resulting_balance"], 1500);

        let back: TransactionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
