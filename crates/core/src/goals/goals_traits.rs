use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::goals::goals_model::{
    NewSavingsGoal, SavingsContribution, SavingsGoal, SavingsGoalInput, SavingsGoalWithProgress,
};
use crate::transactions::NewTransaction;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn find_goal(&self, goal_id: &str) -> Result<Option<SavingsGoal>>;
    fn list_goals(&self, owner_id: &str) -> Result<Vec<SavingsGoal>>;
    async fn insert_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
    /// Raises `current_amount` and records the ledger entry in one write.
    async fn add_contribution(
        &self,
        goal_id: &str,
        amount: Decimal,
        ledger_entry: NewTransaction,
    ) -> Result<SavingsContribution>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, owner_id: &str, today: NaiveDate) -> Result<Vec<SavingsGoalWithProgress>>;
    fn get_goal(
        &self,
        owner_id: &str,
        goal_id: &str,
        today: NaiveDate,
    ) -> Result<SavingsGoalWithProgress>;
    async fn create_goal(&self, owner_id: &str, input: SavingsGoalInput) -> Result<SavingsGoal>;
    async fn delete_goal(&self, owner_id: &str, goal_id: &str) -> Result<()>;
    async fn add_savings(
        &self,
        owner_id: &str,
        goal_id: &str,
        amount: Decimal,
        today: NaiveDate,
    ) -> Result<SavingsGoalWithProgress>;
}
