use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::CategoryType;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::round_amount;

const MAX_DESCRIPTION_LEN: usize = 255;

/// A ledger entry joined with its category as the registry sees it now.
///
/// `amount` is a positive magnitude; the sign comes from `category_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub owner_id: String,
    pub category_id: String,
    pub category_name: String,
    pub category_type: CategoryType,
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.category_type == CategoryType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.category_type == CategoryType::Expense
    }

    /// Amount usable in aggregates. Non-positive amounts never pass
    /// creation, but stored data is not trusted blindly.
    pub fn countable_amount(&self) -> Option<Decimal> {
        (self.amount > Decimal::ZERO).then_some(self.amount)
    }
}

/// Request payload for recording a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub category_id: String,
    pub amount: Decimal,
    pub transaction_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Transaction ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub id: Option<String>,
    pub owner_id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    pub description: String,
}

impl NewTransaction {
    pub fn from_input(owner_id: &str, input: TransactionInput) -> Result<Self> {
        let transaction_date = input.transaction_date.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("transactionDate".to_string()))
        })?;
        let new_transaction = Self {
            id: None,
            owner_id: owner_id.to_string(),
            category_id: input.category_id,
            amount: round_amount(input.amount),
            transaction_date,
            description: input.description.unwrap_or_default().trim().to_string(),
        };
        new_transaction.validate()?;
        Ok(new_transaction)
    }

    pub fn validate(&self) -> Result<()> {
        if self.category_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "categoryId".to_string(),
            )));
        }
        if round_amount(self.amount) <= Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "Amount must be greater than zero, got {}",
                self.amount
            )));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(Error::invalid_input(format!(
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
        Ok(())
    }
}
