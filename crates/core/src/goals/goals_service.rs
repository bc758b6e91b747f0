use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;

use super::goals_model::{NewSavingsGoal, SavingsGoal, SavingsGoalInput, SavingsGoalWithProgress};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::categories::{CategoryServiceTrait, CategoryType};
use crate::constants::SAVINGS_CATEGORY_NAME;
use crate::errors::{Error, Result};
use crate::transactions::NewTransaction;
use crate::utils::decimal_utils::round_amount;

pub struct GoalService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    category_service: Arc<dyn CategoryServiceTrait>,
}

impl GoalService {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        category_service: Arc<dyn CategoryServiceTrait>,
    ) -> Self {
        GoalService {
            goal_repository,
            category_service,
        }
    }

    fn owned_goal(&self, owner_id: &str, goal_id: &str) -> Result<SavingsGoal> {
        self.goal_repository
            .find_goal(goal_id)?
            .filter(|g| g.owner_id == owner_id)
            .ok_or_else(|| Error::NotFound(format!("Savings goal {} not found", goal_id)))
    }

    fn with_progress(goal: SavingsGoal, today: NaiveDate) -> SavingsGoalWithProgress {
        let progress = goal.progress(today);
        SavingsGoalWithProgress { goal, progress }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, owner_id: &str, today: NaiveDate) -> Result<Vec<SavingsGoalWithProgress>> {
        Ok(self
            .goal_repository
            .list_goals(owner_id)?
            .into_iter()
            .map(|goal| Self::with_progress(goal, today))
            .collect())
    }

    fn get_goal(
        &self,
        owner_id: &str,
        goal_id: &str,
        today: NaiveDate,
    ) -> Result<SavingsGoalWithProgress> {
        Ok(Self::with_progress(self.owned_goal(owner_id, goal_id)?, today))
    }

    async fn create_goal(&self, owner_id: &str, input: SavingsGoalInput) -> Result<SavingsGoal> {
        let new_goal = NewSavingsGoal::from_input(owner_id, input)?;
        let goal = self.goal_repository.insert_goal(new_goal).await?;
        debug!("Created savings goal {} for {}", goal.id, owner_id);
        Ok(goal)
    }

    async fn delete_goal(&self, owner_id: &str, goal_id: &str) -> Result<()> {
        let goal = self.owned_goal(owner_id, goal_id)?;
        self.goal_repository.delete_goal(&goal.id).await?;
        Ok(())
    }

    async fn add_savings(
        &self,
        owner_id: &str,
        goal_id: &str,
        amount: Decimal,
        today: NaiveDate,
    ) -> Result<SavingsGoalWithProgress> {
        let amount = round_amount(amount);
        if amount <= Decimal::ZERO {
            return Err(Error::ConstraintViolation(format!(
                "Savings contribution must be greater than zero, got {}",
                amount
            )));
        }

        let goal = self.owned_goal(owner_id, goal_id)?;
        let category = self
            .category_service
            .resolve_or_create(owner_id, SAVINGS_CATEGORY_NAME, CategoryType::Expense)
            .await?;

        let ledger_entry = NewTransaction {
            id: None,
            owner_id: owner_id.to_string(),
            category_id: category.id,
            amount,
            transaction_date: today,
            description: format!("{}: {}", SAVINGS_CATEGORY_NAME, goal.name),
        };
        ledger_entry.validate()?;

        let contribution = self
            .goal_repository
            .add_contribution(&goal.id, amount, ledger_entry)
            .await?;
        info!(
            "Added {} to savings goal {} (now {} of {})",
            amount,
            contribution.goal.id,
            contribution.goal.current_amount,
            contribution.goal.target_amount
        );
        Ok(Self::with_progress(contribution.goal, today))
    }
}
