use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::csv_parser::parse_csv;
use super::imports_model::{ImportResult, ImportRow};
use super::imports_traits::ImportServiceTrait;
use crate::categories::{CategoryServiceTrait, CategoryType};
use crate::errors::{Error, ErrorKind, Result};
use crate::transactions::{NewTransaction, TransactionRepositoryTrait};
use crate::utils::decimal_utils::round_amount;
use crate::utils::time_utils::parse_date;

pub struct ImportService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    category_service: Arc<dyn CategoryServiceTrait>,
}

impl ImportService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        category_service: Arc<dyn CategoryServiceTrait>,
    ) -> Self {
        ImportService {
            transaction_repository,
            category_service,
        }
    }

    async fn import_row(&self, owner_id: &str, row: &ImportRow) -> Result<()> {
        if let Some(problem) = &row.malformed {
            return Err(Error::invalid_input(problem.clone()));
        }
        let transaction_date = parse_date(&row.transaction_date).ok_or_else(|| {
            Error::invalid_input(format!(
                "Invalid transaction_date '{}', expected YYYY-MM-DD",
                row.transaction_date
            ))
        })?;
        let amount = Decimal::from_str(&row.amount)
            .map_err(|_| Error::invalid_input(format!("Invalid amount '{}'", row.amount)))?;
        if row.category_name.is_empty() {
            return Err(Error::invalid_input("category_name is required"));
        }
        let category_type = CategoryType::from_str(&row.category_type)?;

        let new_transaction = NewTransaction {
            id: None,
            owner_id: owner_id.to_string(),
            category_id: String::new(),
            amount: round_amount(amount),
            transaction_date,
            description: row.description.clone(),
        };
        // Check everything but the category before touching the registry so a
        // bad amount never leaves an orphan category behind.
        NewTransaction {
            category_id: "pending".to_string(),
            ..new_transaction.clone()
        }
        .validate()?;

        let category = self
            .category_service
            .resolve_or_create(owner_id, &row.category_name, category_type)
            .await?;
        self.transaction_repository
            .create_transaction(NewTransaction {
                category_id: category.id,
                ..new_transaction
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ImportServiceTrait for ImportService {
    async fn import_csv(&self, owner_id: &str, content: &[u8]) -> Result<ImportResult> {
        let rows = parse_csv(content)?;
        debug!("Parsed {} import rows for {}", rows.len(), owner_id);
        self.import_rows(owner_id, rows).await
    }

    async fn import_rows(&self, owner_id: &str, rows: Vec<ImportRow>) -> Result<ImportResult> {
        let mut result = ImportResult::default();
        for row in &rows {
            match self.import_row(owner_id, row).await {
                Ok(()) => result.record_success(),
                // The store going away is not a row problem.
                Err(e) if e.kind() == ErrorKind::UpstreamUnavailable => return Err(e),
                Err(e) => {
                    warn!("Import row {} rejected: {}", row.row, e);
                    result.record_failure(row.row, e.to_string());
                }
            }
        }
        info!(
            "Import for {} finished: {} imported, {} rejected",
            owner_id, result.success_count, result.error_count
        );
        Ok(result)
    }
}
