use std::borrow::Borrow;
use std::cmp::Ordering;

use log::warn;
use serde::{Serialize, Serializer};

use super::transactions_model::Transaction;

/// Ordering applied to a filtered ledger before pagination.
///
/// Comparisons never break ties; callers sort with a stable algorithm so
/// equal keys keep their ledger (insertion) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionSort {
    DateAsc,
    #[default]
    DateDesc,
    AmountAsc,
    AmountDesc,
    /// Unknown sort key: every pair compares equal, so nothing moves.
    Unordered,
}

impl TransactionSort {
    /// Absent key means newest first; an unrecognized key means no reordering.
    pub fn from_key(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            None | Some("") => TransactionSort::DateDesc,
            Some("date_asc") => TransactionSort::DateAsc,
            Some("date_desc") => TransactionSort::DateDesc,
            Some("amount_asc") => TransactionSort::AmountAsc,
            Some("amount_desc") => TransactionSort::AmountDesc,
            Some(other) => {
                warn!("Unknown sort key '{}', keeping ledger order", other);
                TransactionSort::Unordered
            }
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            TransactionSort::DateAsc => "date_asc",
            TransactionSort::DateDesc => "date_desc",
            TransactionSort::AmountAsc => "amount_asc",
            TransactionSort::AmountDesc => "amount_desc",
            TransactionSort::Unordered => "unordered",
        }
    }

    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            TransactionSort::DateAsc => a.transaction_date.cmp(&b.transaction_date),
            TransactionSort::DateDesc => b.transaction_date.cmp(&a.transaction_date),
            TransactionSort::AmountAsc => a.amount.cmp(&b.amount),
            TransactionSort::AmountDesc => b.amount.cmp(&a.amount),
            TransactionSort::Unordered => Ordering::Equal,
        }
    }
}

impl Serialize for TransactionSort {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_key())
    }
}

/// Stable in-place sort.
pub fn sort_transactions<T: Borrow<Transaction>>(items: &mut [T], sort: TransactionSort) {
    items.sort_by(|a, b| sort.compare(a.borrow(), b.borrow()));
}
