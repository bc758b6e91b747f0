use chrono::NaiveDate;

use super::aggregation_model::{
    CategorySpending, DailySpendingSummary, DashboardSummary, GlobalSummary, MonthlyAmount,
    MonthlyBalance, WeeklyGoalProgress,
};
use crate::errors::Result;

/// Trait for dashboard rollups over one owner's ledger
pub trait DashboardServiceTrait: Send + Sync {
    fn get_summary(&self, owner_id: &str, today: NaiveDate) -> Result<DashboardSummary>;
    fn get_spending_by_category(&self, owner_id: &str) -> Result<Vec<CategorySpending>>;
    fn get_weekly_goal(&self, owner_id: &str, today: NaiveDate) -> Result<WeeklyGoalProgress>;
    fn get_monthly_balance(&self, owner_id: &str, today: NaiveDate) -> Result<MonthlyBalance>;
    /// Read-only rollup across every ledger.
    fn get_global_summary(&self) -> Result<GlobalSummary>;
}

/// Trait for spending analysis over trailing windows
pub trait AnalysisServiceTrait: Send + Sync {
    fn get_monthly_spending(
        &self,
        owner_id: &str,
        months: i64,
        category_id: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<MonthlyAmount>>;

    fn get_daily_spending(
        &self,
        owner_id: &str,
        days: i64,
        category_id: Option<&str>,
        today: NaiveDate,
    ) -> Result<DailySpendingSummary>;
}
