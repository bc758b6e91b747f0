use async_trait::async_trait;
use chrono::NaiveDate;

use super::transactions_model::{NewTransaction, Transaction, TransactionInput};
use super::transactions_query::{TransactionQuery, TransactionSearchResponse};
use crate::errors::Result;

/// Trait for ledger store operations.
///
/// List methods return rows in ledger order (creation time, then id) so that
/// stable sorts on top of them are deterministic.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn find_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>>;
    fn list_transactions(&self, owner_id: &str) -> Result<Vec<Transaction>>;
    /// Every user's ledger. Read-only, for administrator rollups.
    fn list_all_transactions(&self) -> Result<Vec<Transaction>>;
    /// Transactions dated within `from..=to`.
    fn list_transactions_between(
        &self,
        owner_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>>;
    /// Filter, sort and paginate inside the store from a single snapshot.
    fn search_transactions(
        &self,
        owner_id: &str,
        query: &TransactionQuery,
    ) -> Result<TransactionSearchResponse>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn delete_transaction(&self, transaction_id: &str) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn search_transactions(
        &self,
        owner_id: &str,
        query: &TransactionQuery,
    ) -> Result<TransactionSearchResponse>;
    /// Full ledger, newest first.
    fn get_transactions(&self, owner_id: &str) -> Result<Vec<Transaction>>;
    /// Distinct category names used in the owner's ledger, sorted.
    fn get_category_universe(&self, owner_id: &str) -> Result<Vec<String>>;
    async fn create_transaction(
        &self,
        owner_id: &str,
        input: TransactionInput,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, owner_id: &str, transaction_id: &str) -> Result<()>;
    async fn delete_transaction_as_admin(&self, transaction_id: &str) -> Result<()>;
}
