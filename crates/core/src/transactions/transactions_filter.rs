//! Predicate evaluation for ledger listings.
//!
//! A [`TransactionFilter`] is an immutable value built once per request,
//! usually by normalizing a [`TransactionFilterRequest`]. Malformed inputs
//! (unparseable dates, non-numeric or non-finite amounts, unknown type labels)
//! become "no constraint" instead of failing the whole listing.

use std::str::FromStr;

use chrono::NaiveDate;
use log::warn;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transactions_model::Transaction;
use crate::categories::CategoryType;
use crate::constants::FILTER_ALL;
use crate::utils::time_utils::parse_date;

/// Raw filter values as they arrive from a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilterRequest {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
}

impl TransactionFilterRequest {
    pub fn normalize(&self) -> TransactionFilter {
        TransactionFilter::default()
            .with_search(self.search.as_deref())
            .with_category_name(self.category.as_deref())
            .with_category_type(self.transaction_type.as_deref().and_then(parse_type_label))
            .with_from(self.from.as_deref().and_then(|raw| lenient_date("from", raw)))
            .with_to(self.to.as_deref().and_then(|raw| lenient_date("to", raw)))
            .with_min_amount(
                self.min_amount
                    .as_deref()
                    .and_then(|raw| lenient_amount("minAmount", raw)),
            )
            .with_max_amount(
                self.max_amount
                    .as_deref()
                    .and_then(|raw| lenient_amount("maxAmount", raw)),
            )
    }
}

/// Immutable set of predicates. Unset dimensions always pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    search: Option<String>,
    category_name: Option<String>,
    category_type: Option<CategoryType>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    min_amount: Option<Decimal>,
    max_amount: Option<Decimal>,
}

impl TransactionFilter {
    /// Case-insensitive description substring. Empty means unset.
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search.filter(|s| !s.is_empty()).map(fold_case);
        self
    }

    /// Exact, case-sensitive category name. Empty or `"all"` means unset.
    pub fn with_category_name(mut self, name: Option<&str>) -> Self {
        self.category_name = name
            .filter(|n| !n.is_empty() && *n != FILTER_ALL)
            .map(str::to_string);
        self
    }

    pub fn with_category_type(mut self, category_type: Option<CategoryType>) -> Self {
        self.category_type = category_type;
        self
    }

    pub fn with_from(mut self, from: Option<NaiveDate>) -> Self {
        self.from = from;
        self
    }

    pub fn with_to(mut self, to: Option<NaiveDate>) -> Self {
        self.to = to;
        self
    }

    pub fn with_min_amount(mut self, min: Option<Decimal>) -> Self {
        self.min_amount = min;
        self
    }

    pub fn with_max_amount(mut self, max: Option<Decimal>) -> Self {
        self.max_amount = max;
        self
    }

    /// Folded search term.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    pub fn category_type(&self) -> Option<CategoryType> {
        self.category_type
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn min_amount(&self) -> Option<Decimal> {
        self.min_amount
    }

    pub fn max_amount(&self) -> Option<Decimal> {
        self.max_amount
    }

    pub fn is_empty(&self) -> bool {
        *self == TransactionFilter::default()
    }

    /// True when every active dimension accepts the transaction.
    ///
    /// Both date bounds are applied as given; `from > to` simply matches nothing.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(search) = &self.search {
            if !fold_case(&transaction.description).contains(search.as_str()) {
                return false;
            }
        }
        if let Some(name) = &self.category_name {
            if transaction.category_name != *name {
                return false;
            }
        }
        if let Some(category_type) = self.category_type {
            if transaction.category_type != category_type {
                return false;
            }
        }
        if self.from.is_some_and(|from| transaction.transaction_date < from) {
            return false;
        }
        if self.to.is_some_and(|to| transaction.transaction_date > to) {
            return false;
        }
        if self.min_amount.is_some_and(|min| transaction.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| transaction.amount > max) {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Case folding shared by the in-memory predicate and the SQL search.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Converts a float bound, treating NaN and infinities as unset.
///
/// Finite values beyond the decimal range saturate to `Decimal::MAX` or
/// `Decimal::MIN`; magnitudes too small to represent become zero.
pub fn finite_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    match Decimal::from_f64(value) {
        Some(converted) => Some(converted),
        None if value.abs() < 1.0 => Some(Decimal::ZERO),
        None if value.is_sign_negative() => Some(Decimal::MIN),
        None => Some(Decimal::MAX),
    }
}

/// `income` / `expense` (any case). `all`, empty and unknown labels are unset.
pub fn parse_type_label(raw: &str) -> Option<CategoryType> {
    let label = raw.trim();
    if label.is_empty() || label.eq_ignore_ascii_case(FILTER_ALL) {
        return None;
    }
    match CategoryType::from_str(label) {
        Ok(category_type) => Some(category_type),
        Err(_) => {
            warn!("Ignoring unknown transaction type filter '{}'", label);
            None
        }
    }
}

fn lenient_date(field: &str, raw: &str) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = parse_date(raw);
    if parsed.is_none() {
        warn!("Ignoring unparseable '{}' date filter: {:?}", field, raw);
    }
    parsed
}

fn lenient_amount(field: &str, raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(value) = Decimal::from_str(raw) {
        return Some(value);
    }
    let parsed = raw.parse::<f64>().ok().and_then(finite_decimal);
    if parsed.is_none() {
        warn!("Ignoring non-numeric '{}' filter: {:?}", field, raw);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tx(description: &str, category: &str, kind: CategoryType, date: &str, amount: Decimal) -> Transaction {
        Transaction {
            id: format!("{}-{}", category, date),
            owner_id: "u1".into(),
            category_id: category.to_lowercase(),
            category_name: category.into(),
            category_type: kind,
            amount,
            transaction_date: parse_date(date).unwrap(),
            description: description.into(),
            created_at: parse_date(date).unwrap().and_hms_opt(12, 0, 0).unwrap(),
        }
    }

    fn groceries() -> Transaction {
        tx("Weekly GROCERIES run", "Food", CategoryType::Expense, "2024-01-05", dec!(50))
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = TransactionFilterRequest::default().normalize();
        assert!(filter.is_empty());
        assert!(filter.matches(&groceries()));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filter = TransactionFilter::default().with_search(Some("groceries"));
        assert!(filter.matches(&groceries()));
        let filter = TransactionFilter::default().with_search(Some("Run"));
        assert!(filter.matches(&groceries()));
        let filter = TransactionFilter::default().with_search(Some("rent"));
        assert!(!filter.matches(&groceries()));
    }

    #[test]
    fn search_folds_non_ascii_letters() {
        let t = tx("Plaća za SIJEČANJ", "Salary", CategoryType::Income, "2024-01-10", dec!(200));
        let filter = TransactionFilter::default().with_search(Some("siječanj"));
        assert!(filter.matches(&t));
        let filter = TransactionFilter::default().with_search(Some("PLAĆA"));
        assert!(filter.matches(&t));
    }

    #[test]
    fn empty_description_only_matches_empty_search() {
        let t = tx("", "Food", CategoryType::Expense, "2024-01-05", dec!(5));
        assert!(TransactionFilter::default().with_search(Some("")).matches(&t));
        assert!(!TransactionFilter::default().with_search(Some("a")).matches(&t));
    }

    #[test]
    fn category_is_exact_and_case_sensitive() {
        let filter = TransactionFilter::default().with_category_name(Some("Food"));
        assert!(filter.matches(&groceries()));
        let filter = TransactionFilter::default().with_category_name(Some("food"));
        assert!(!filter.matches(&groceries()));
        let filter = TransactionFilter::default().with_category_name(Some("all"));
        assert!(filter.matches(&groceries()));
    }

    #[test]
    fn type_labels_map_to_category_type() {
        let request = TransactionFilterRequest {
            transaction_type: Some("income".into()),
            ..Default::default()
        };
        assert!(!request.normalize().matches(&groceries()));

        let request = TransactionFilterRequest {
            transaction_type: Some("Expense".into()),
            ..Default::default()
        };
        assert!(request.normalize().matches(&groceries()));

        let request = TransactionFilterRequest {
            transaction_type: Some("transfer".into()),
            ..Default::default()
        };
        assert_eq!(request.normalize().category_type(), None);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let request = TransactionFilterRequest {
            from: Some("2024-01-05".into()),
            to: Some("2024-01-05".into()),
            ..Default::default()
        };
        assert!(request.normalize().matches(&groceries()));

        let request = TransactionFilterRequest {
            from: Some("2024-01-06".into()),
            ..Default::default()
        };
        assert!(!request.normalize().matches(&groceries()));
    }

    #[test]
    fn inverted_date_range_matches_nothing() {
        let filter = TransactionFilter::default()
            .with_from(parse_date("2024-02-01"))
            .with_to(parse_date("2024-01-01"));
        assert!(!filter.matches(&groceries()));
    }

    #[test]
    fn amount_bounds_are_inclusive() {
        let filter = TransactionFilter::default()
            .with_min_amount(Some(dec!(50)))
            .with_max_amount(Some(dec!(50)));
        assert!(filter.matches(&groceries()));
        let filter = TransactionFilter::default().with_min_amount(Some(dec!(50.01)));
        assert!(!filter.matches(&groceries()));
    }

    #[test]
    fn malformed_values_are_treated_as_unset() {
        let request = TransactionFilterRequest {
            from: Some("yesterday".into()),
            to: Some("2024-13-01".into()),
            min_amount: Some("NaN".into()),
            max_amount: Some("lots".into()),
            ..Default::default()
        };
        let filter = request.normalize();
        assert!(filter.is_empty());
        assert!(filter.matches(&groceries()));

        let request = TransactionFilterRequest {
            min_amount: Some("inf".into()),
            ..Default::default()
        };
        assert_eq!(request.normalize().min_amount(), None);
    }

    #[test]
    fn amounts_accept_scientific_notation() {
        let request = TransactionFilterRequest {
            min_amount: Some("1e2".into()),
            ..Default::default()
        };
        assert_eq!(request.normalize().min_amount(), Some(dec!(100)));
    }

    #[test]
    fn non_finite_float_bounds_are_unset() {
        assert_eq!(finite_decimal(f64::NAN), None);
        assert_eq!(finite_decimal(f64::INFINITY), None);
        assert_eq!(finite_decimal(100.0), Some(dec!(100)));
        assert_eq!(finite_decimal(1e30), Some(Decimal::MAX));
        assert_eq!(finite_decimal(-1e30), Some(Decimal::MIN));
    }

    #[test]
    fn out_of_range_finite_bounds_saturate() {
        for raw in ["1e30", "1e33", "1e300", "100000000000000000000000000000000"] {
            let request = TransactionFilterRequest {
                min_amount: Some(raw.into()),
                ..Default::default()
            };
            let filter = request.normalize();
            assert_eq!(filter.min_amount(), Some(Decimal::MAX), "minAmount={}", raw);
            assert!(!filter.matches(&groceries()));
        }

        let request = TransactionFilterRequest {
            max_amount: Some("-1e30".into()),
            ..Default::default()
        };
        let filter = request.normalize();
        assert_eq!(filter.max_amount(), Some(Decimal::MIN));
        assert!(!filter.matches(&groceries()));

        let request = TransactionFilterRequest {
            min_amount: Some("-1e30".into()),
            max_amount: Some("1e30".into()),
            ..Default::default()
        };
        let filter = request.normalize();
        assert_eq!(filter.min_amount(), Some(Decimal::MIN));
        assert_eq!(filter.max_amount(), Some(Decimal::MAX));
        assert!(filter.matches(&groceries()));
    }

    #[test]
    fn applying_twice_gives_the_same_result() {
        let data = vec![
            groceries(),
            tx("salary", "Salary", CategoryType::Income, "2024-01-10", dec!(200)),
        ];
        let filter = TransactionFilter::default().with_min_amount(Some(dec!(100)));
        let once: Vec<Transaction> = filter.apply(&data).into_iter().cloned().collect();
        let twice: Vec<Transaction> = filter.apply(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
    }
}
