//! Database models for savings goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use fintrack_core::goals::{NewSavingsGoal, SavingsGoal};
use fintrack_core::Result;
use serde::{Deserialize, Serialize};

use crate::utils::{from_minor_units, to_minor_units};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::savings_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalDB {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub target_minor: i64,
    pub current_minor: i64,
    pub deadline: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::savings_goals)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsGoalDB {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub target_minor: i64,
    pub current_minor: i64,
    pub deadline: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl From<SavingsGoalDB> for SavingsGoal {
    fn from(db: SavingsGoalDB) -> Self {
        Self {
            id: db.id,
            owner_id: db.owner_id,
            name: db.name,
            target_amount: from_minor_units(db.target_minor),
            current_amount: from_minor_units(db.current_minor),
            deadline: db.deadline,
            created_at: db.created_at,
        }
    }
}

impl NewSavingsGoalDB {
    pub fn from_domain(
        domain: NewSavingsGoal,
        id: String,
        created_at: NaiveDateTime,
    ) -> Result<Self> {
        Ok(Self {
            target_minor: to_minor_units(domain.target_amount)?,
            current_minor: 0,
            id: domain.id.unwrap_or(id),
            owner_id: domain.owner_id,
            name: domain.name,
            deadline: domain.deadline,
            created_at,
        })
    }
}
