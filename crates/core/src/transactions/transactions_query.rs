//! Filter, sort and paginate a ledger.
//!
//! The contract is the same whether evaluation happens here over an
//! in-memory slice or inside the store: filter first, sort the whole filtered
//! set, then slice one zero-indexed page. `total_count` always counts the
//! filtered set.

use serde::Serialize;

use super::transactions_filter::TransactionFilter;
use super::transactions_model::Transaction;
use super::transactions_sort::{sort_transactions, TransactionSort};
use crate::aggregation::{totals, Totals};
use crate::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    filter: TransactionFilter,
    sort: TransactionSort,
    page: i64,
    page_size: i64,
}

impl TransactionQuery {
    pub fn new(
        filter: TransactionFilter,
        sort: TransactionSort,
        page: i64,
        page_size: i64,
    ) -> Result<Self> {
        if page < 0 {
            return Err(Error::invalid_input(format!(
                "page must be zero or greater, got {}",
                page
            )));
        }
        if page_size <= 0 {
            return Err(Error::invalid_input(format!(
                "pageSize must be greater than zero, got {}",
                page_size
            )));
        }
        Ok(Self {
            filter,
            sort,
            page,
            page_size,
        })
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    pub fn sort(&self) -> TransactionSort {
        self.sort
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Row offset of the first item on the page; `None` when it overflows,
    /// which can only mean the page is past the end.
    pub fn offset(&self) -> Option<i64> {
        self.page.checked_mul(self.page_size)
    }

    /// Same filter and sort, another page.
    pub fn with_page(&self, page: i64) -> Result<Self> {
        Self::new(self.filter.clone(), self.sort, page, self.page_size)
    }
}

/// One page of a filtered, sorted ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub items: Vec<Transaction>,
    pub total_count: i64,
}

/// A page together with the totals of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSearchResponse {
    pub items: Vec<Transaction>,
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub totals: Totals,
}

impl TransactionSearchResponse {
    pub fn new(query: &TransactionQuery, page: TransactionPage, totals: Totals) -> Self {
        Self {
            items: page.items,
            total_count: page.total_count,
            page: query.page(),
            page_size: query.page_size(),
            totals,
        }
    }

    pub fn page_count(&self) -> i64 {
        page_count(self.total_count, self.page_size)
    }
}

/// Number of pages needed to show `total_count` rows.
pub fn page_count(total_count: i64, page_size: i64) -> i64 {
    if total_count <= 0 || page_size <= 0 {
        return 0;
    }
    (total_count + page_size - 1) / page_size
}

/// Runs a query over an in-memory ledger given in ledger order.
pub fn run_query(transactions: &[Transaction], query: &TransactionQuery) -> TransactionPage {
    let mut matched = query.filter().apply(transactions);
    sort_transactions(&mut matched, query.sort());

    let total_count = matched.len() as i64;
    TransactionPage {
        items: slice_page(&matched, query)
            .iter()
            .map(|t| (*t).clone())
            .collect(),
        total_count,
    }
}

/// [`run_query`] plus totals over every matching transaction.
pub fn search_in_memory(
    transactions: &[Transaction],
    query: &TransactionQuery,
) -> TransactionSearchResponse {
    let filtered_totals = totals(query.filter().apply(transactions));
    TransactionSearchResponse::new(query, run_query(transactions, query), filtered_totals)
}

fn slice_page<'a, T>(sorted: &'a [T], query: &TransactionQuery) -> &'a [T] {
    let start = query
        .offset()
        .and_then(|offset| usize::try_from(offset).ok())
        .unwrap_or(usize::MAX);
    if start >= sorted.len() {
        return &[];
    }
    let size = usize::try_from(query.page_size()).unwrap_or(usize::MAX);
    let end = start.saturating_add(size).min(sorted.len());
    &sorted[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryType;
    use crate::errors::ErrorKind;
    use crate::transactions::TransactionFilterRequest;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn tx(id: &str, date: &str, amount: Decimal, kind: CategoryType, category: &str) -> Transaction {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Transaction {
            id: id.into(),
            owner_id: "u1".into(),
            category_id: category.to_lowercase(),
            category_name: category.into(),
            category_type: kind,
            amount,
            transaction_date: date,
            description: String::new(),
            created_at: date.and_hms_opt(9, 0, 0).unwrap(),
        }
    }

    fn scenario_ledger() -> Vec<Transaction> {
        vec![
            tx("jan5", "2024-01-05", dec!(50), CategoryType::Expense, "Hrana"),
            tx("jan10", "2024-01-10", dec!(200), CategoryType::Income, "Plaća"),
        ]
    }

    fn query(filter: TransactionFilter, sort: TransactionSort, page: i64, size: i64) -> TransactionQuery {
        TransactionQuery::new(filter, sort, page, size).unwrap()
    }

    #[test]
    fn newest_first_with_totals_over_full_set() {
        let q = query(TransactionFilter::default(), TransactionSort::DateDesc, 0, 10);
        let response = search_in_memory(&scenario_ledger(), &q);

        let ids: Vec<&str> = response.items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["jan10", "jan5"]);
        assert_eq!(response.totals.income, dec!(200));
        assert_eq!(response.totals.expense, dec!(50));
        assert_eq!(response.totals.saved, dec!(150));
    }

    #[test]
    fn min_amount_filters_before_counting() {
        let filter = TransactionFilterRequest {
            min_amount: Some("100".into()),
            ..Default::default()
        }
        .normalize();
        let page = run_query(&scenario_ledger(), &query(filter, TransactionSort::DateDesc, 0, 10));
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].id, "jan10");
    }

    #[test]
    fn out_of_range_page_is_empty_with_real_count() {
        let ledger: Vec<Transaction> = (1..=12)
            .map(|day| {
                tx(
                    &format!("t{}", day),
                    &format!("2024-03-{:02}", day),
                    dec!(10),
                    CategoryType::Expense,
                    "Food",
                )
            })
            .collect();
        let page = run_query(&ledger, &query(TransactionFilter::default(), TransactionSort::DateAsc, 5, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 12);

        let last = run_query(&ledger, &query(TransactionFilter::default(), TransactionSort::DateAsc, 1, 10));
        assert_eq!(last.items.len(), 2);
        assert_eq!(last.items[0].id, "t11");
    }

    #[test]
    fn sorting_spans_pages_not_just_the_current_one() {
        let ledger = vec![
            tx("small", "2024-01-01", dec!(5), CategoryType::Expense, "Food"),
            tx("large", "2024-01-02", dec!(500), CategoryType::Expense, "Food"),
            tx("mid", "2024-01-03", dec!(50), CategoryType::Expense, "Food"),
        ];
        let first = run_query(&ledger, &query(TransactionFilter::default(), TransactionSort::AmountDesc, 0, 1));
        assert_eq!(first.items[0].id, "large");
        let second = run_query(&ledger, &query(TransactionFilter::default(), TransactionSort::AmountDesc, 1, 1));
        assert_eq!(second.items[0].id, "mid");
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let page = run_query(
            &scenario_ledger(),
            &query(TransactionFilter::default(), TransactionSort::DateDesc, i64::MAX, 10),
        );
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn invalid_paging_fails_fast() {
        let err = TransactionQuery::new(TransactionFilter::default(), TransactionSort::DateDesc, 0, -1)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = TransactionQuery::new(TransactionFilter::default(), TransactionSort::DateDesc, 0, 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = TransactionQuery::new(TransactionFilter::default(), TransactionSort::DateDesc, -1, 5)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(12, 10), 2);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(0, 10), 0);
    }
}
