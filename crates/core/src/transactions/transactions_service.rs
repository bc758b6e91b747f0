use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::transactions_model::{NewTransaction, Transaction, TransactionInput};
use super::transactions_query::{TransactionQuery, TransactionSearchResponse};
use super::transactions_sort::{sort_transactions, TransactionSort};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::aggregation::category_universe;
use crate::categories::CategoryServiceTrait;
use crate::errors::{Error, Result};

pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    category_service: Arc<dyn CategoryServiceTrait>,
}

impl TransactionService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        category_service: Arc<dyn CategoryServiceTrait>,
    ) -> Self {
        TransactionService {
            transaction_repository,
            category_service,
        }
    }

    fn not_found(transaction_id: &str) -> Error {
        Error::NotFound(format!("Transaction {} not found", transaction_id))
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn search_transactions(
        &self,
        owner_id: &str,
        query: &TransactionQuery,
    ) -> Result<TransactionSearchResponse> {
        debug!(
            "Searching transactions for {} (page {}, size {}, sort {})",
            owner_id,
            query.page(),
            query.page_size(),
            query.sort().as_key()
        );
        self.transaction_repository
            .search_transactions(owner_id, query)
    }

    fn get_transactions(&self, owner_id: &str) -> Result<Vec<Transaction>> {
        let mut transactions = self.transaction_repository.list_transactions(owner_id)?;
        sort_transactions(&mut transactions, TransactionSort::DateDesc);
        Ok(transactions)
    }

    fn get_category_universe(&self, owner_id: &str) -> Result<Vec<String>> {
        let transactions = self.transaction_repository.list_transactions(owner_id)?;
        Ok(category_universe(&transactions).into_iter().collect())
    }

    async fn create_transaction(
        &self,
        owner_id: &str,
        input: TransactionInput,
    ) -> Result<Transaction> {
        let new_transaction = NewTransaction::from_input(owner_id, input)?;
        // Personal categories of other users look exactly like missing ones.
        self.category_service
            .get_visible_category(owner_id, &new_transaction.category_id)?;

        let created = self
            .transaction_repository
            .create_transaction(new_transaction)
            .await?;
        debug!("Recorded transaction {} for {}", created.id, owner_id);
        Ok(created)
    }

    async fn delete_transaction(&self, owner_id: &str, transaction_id: &str) -> Result<()> {
        let existing = self
            .transaction_repository
            .find_transaction(transaction_id)?
            .filter(|t| t.owner_id == owner_id)
            .ok_or_else(|| Self::not_found(transaction_id))?;

        self.transaction_repository
            .delete_transaction(&existing.id)
            .await?;
        Ok(())
    }

    async fn delete_transaction_as_admin(&self, transaction_id: &str) -> Result<()> {
        let deleted = self
            .transaction_repository
            .delete_transaction(transaction_id)
            .await?;
        if deleted == 0 {
            return Err(Self::not_found(transaction_id));
        }
        info!("Administrator deleted transaction {}", transaction_id);
        Ok(())
    }
}
