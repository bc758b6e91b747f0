//! Transactions module - ledger model, filtering, sorting, pagination and services.

mod debounced_query;
mod transactions_filter;
mod transactions_model;
mod transactions_query;
mod transactions_service;
mod transactions_sort;
mod transactions_traits;


pub use debounced_query::DebouncedQuery;
pub use transactions_filter::{
    finite_decimal, fold_case, parse_type_label, TransactionFilter, TransactionFilterRequest,
};
pub use transactions_model::{NewTransaction, Transaction, TransactionInput};
pub use transactions_query::{
    page_count, run_query, search_in_memory, TransactionPage, TransactionQuery,
    TransactionSearchResponse,
};
pub use transactions_service::TransactionService;
pub use transactions_sort::{sort_transactions, TransactionSort};
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
