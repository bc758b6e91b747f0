//! Database models for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use fintrack_core::categories::{Category, CategoryType, NewCategory};
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::parse_stored;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub category_type: String,
    pub owner_id: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[serde(rename_all = "camelCase")]
pub struct NewCategoryDB {
    pub id: String,
    pub name: String,
    pub category_type: String,
    pub owner_id: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<CategoryDB> for Category {
    type Error = StorageError;

    fn try_from(db: CategoryDB) -> Result<Self, Self::Error> {
        let category_type: CategoryType =
            parse_stored("categories.category_type", &db.category_type)?;
        Ok(Self {
            category_type,
            id: db.id,
            name: db.name,
            owner_id: db.owner_id,
            created_at: db.created_at,
        })
    }
}

impl NewCategoryDB {
    pub fn from_domain(domain: NewCategory, id: String, created_at: NaiveDateTime) -> Self {
        Self {
            id: domain.id.unwrap_or(id),
            name: domain.name,
            category_type: domain.category_type.as_str().to_string(),
            owner_id: domain.owner_id,
            created_at,
        }
    }
}
