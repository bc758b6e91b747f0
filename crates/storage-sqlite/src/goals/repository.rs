use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::goals::{GoalRepositoryTrait, NewSavingsGoal, SavingsContribution, SavingsGoal};
use fintrack_core::transactions::NewTransaction;
use fintrack_core::{Error, Result};

use super::model::{NewSavingsGoalDB, SavingsGoalDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::savings_goals;
use crate::transactions::insert_transaction;
use crate::utils::to_minor_units;

pub struct GoalRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn find_goal(&self, goal_id: &str) -> Result<Option<SavingsGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let goal = savings_goals::table
            .find(goal_id)
            .select(SavingsGoalDB::as_select())
            .first::<SavingsGoalDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(goal.map(SavingsGoal::from))
    }

    fn list_goals(&self, owner: &str) -> Result<Vec<SavingsGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = savings_goals::table
            .filter(savings_goals::owner_id.eq(owner))
            .order((savings_goals::created_at.asc(), savings_goals::id.asc()))
            .select(SavingsGoalDB::as_select())
            .load::<SavingsGoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(goals_db.into_iter().map(SavingsGoal::from).collect())
    }

    async fn insert_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsGoal> {
                let new_goal_db = NewSavingsGoalDB::from_domain(
                    new_goal,
                    Uuid::now_v7().to_string(),
                    Utc::now().naive_utc(),
                )?;
                let result_db = diesel::insert_into(savings_goals::table)
                    .values(&new_goal_db)
                    .returning(SavingsGoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(SavingsGoal::from(result_db))
            })
            .await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(savings_goals::table.find(goal_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn add_contribution(
        &self,
        goal_id: &str,
        amount: Decimal,
        ledger_entry: NewTransaction,
    ) -> Result<SavingsContribution> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsContribution> {
                let minor = to_minor_units(amount)?;
                let updated = diesel::update(savings_goals::table.find(goal_id.as_str()))
                    .set(savings_goals::current_minor.eq(savings_goals::current_minor + minor))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(Error::NotFound(format!("Savings goal {} not found", goal_id)));
                }

                let transaction = insert_transaction(conn, ledger_entry)?;
                let goal = savings_goals::table
                    .find(goal_id.as_str())
                    .select(SavingsGoalDB::as_select())
                    .first::<SavingsGoalDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(SavingsContribution {
                    goal: SavingsGoal::from(goal),
                    transaction,
                })
            })
            .await
    }
}
