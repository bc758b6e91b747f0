//! Database models for ledger entries.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use fintrack_core::categories::CategoryType;
use fintrack_core::transactions::{NewTransaction, Transaction};
use fintrack_core::Result;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::schema::categories;
use crate::utils::{from_minor_units, parse_stored, to_minor_units};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TransactionDB {
    pub id: String,
    pub owner_id: String,
    pub category_id: String,
    pub amount_minor: i64,
    pub transaction_date: NaiveDate,
    pub description: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionDB {
    pub id: String,
    pub owner_id: String,
    pub category_id: String,
    pub amount_minor: i64,
    pub transaction_date: NaiveDate,
    pub description: String,
    pub created_at: NaiveDateTime,
}

/// Ledger row joined with its category's current name and type.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDetailsDB {
    #[diesel(embed)]
    pub transaction: TransactionDB,
    #[diesel(select_expression = categories::name)]
    pub category_name: String,
    #[diesel(select_expression = categories::category_type)]
    pub category_type: String,
}

impl TryFrom<TransactionDetailsDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDetailsDB) -> std::result::Result<Self, Self::Error> {
        let category_type: CategoryType =
            parse_stored("categories.category_type", &db.category_type)?;
        let row = db.transaction;
        Ok(Self {
            id: row.id,
            owner_id: row.owner_id,
            category_id: row.category_id,
            category_name: db.category_name,
            category_type,
            amount: from_minor_units(row.amount_minor),
            transaction_date: row.transaction_date,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

impl NewTransactionDB {
    pub fn from_domain(
        domain: NewTransaction,
        id: String,
        created_at: NaiveDateTime,
    ) -> Result<Self> {
        Ok(Self {
            amount_minor: to_minor_units(domain.amount)?,
            id: domain.id.unwrap_or(id),
            owner_id: domain.owner_id,
            category_id: domain.category_id,
            transaction_date: domain.transaction_date,
            description: domain.description,
            created_at,
        })
    }
}
