use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::aggregation_engine::{monthly_balance, spending_by_category, totals, weekly_goal};
use super::aggregation_model::{
    CategorySpending, DashboardSummary, GlobalSummary, MonthlyBalance, WeeklyGoalProgress,
};
use super::aggregation_traits::DashboardServiceTrait;
use crate::errors::Result;
use crate::transactions::TransactionRepositoryTrait;
use crate::utils::time_utils::{month_bounds, week_bounds};

pub struct DashboardService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    weekly_goal: Decimal,
}

impl DashboardService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        weekly_goal: Decimal,
    ) -> Self {
        DashboardService {
            transaction_repository,
            weekly_goal,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_summary(&self, owner_id: &str, today: NaiveDate) -> Result<DashboardSummary> {
        // One read so every figure comes from the same ledger state.
        let ledger = self.transaction_repository.list_transactions(owner_id)?;
        debug!(
            "Building dashboard for {} over {} transactions",
            owner_id,
            ledger.len()
        );
        Ok(DashboardSummary {
            totals: totals(&ledger),
            monthly_balance: monthly_balance(&ledger, today),
            weekly_goal: weekly_goal(&ledger, self.weekly_goal, today),
            spending_by_category: spending_by_category(&ledger),
        })
    }

    fn get_spending_by_category(&self, owner_id: &str) -> Result<Vec<CategorySpending>> {
        let ledger = self.transaction_repository.list_transactions(owner_id)?;
        Ok(spending_by_category(&ledger))
    }

    fn get_weekly_goal(&self, owner_id: &str, today: NaiveDate) -> Result<WeeklyGoalProgress> {
        let (start, end) = week_bounds(today);
        let week = self
            .transaction_repository
            .list_transactions_between(owner_id, start, end)?;
        Ok(weekly_goal(&week, self.weekly_goal, today))
    }

    fn get_monthly_balance(&self, owner_id: &str, today: NaiveDate) -> Result<MonthlyBalance> {
        let (start, end) = month_bounds(today);
        let month = self
            .transaction_repository
            .list_transactions_between(owner_id, start, end)?;
        Ok(monthly_balance(&month, today))
    }

    fn get_global_summary(&self) -> Result<GlobalSummary> {
        let everything = self.transaction_repository.list_all_transactions()?;
        let owner_count = everything
            .iter()
            .map(|t| t.owner_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        Ok(GlobalSummary {
            totals: totals(&everything),
            transaction_count: everything.len(),
            owner_count,
            spending_by_category: spending_by_category(&everything),
        })
    }
}
