//! Aggregation module - totals, category breakdowns and calendar rollups.

mod aggregation_engine;
mod aggregation_model;
mod aggregation_traits;
mod analysis_service;
mod dashboard_service;


pub use aggregation_engine::{
    category_universe, daily_spending, monthly_balance, monthly_expense_series, monthly_spending,
    spending_by_category, totals, weekly_goal,
};
pub use aggregation_model::{
    CategorySpending, DailySpendingSummary, DashboardSummary, DayAmount, GlobalSummary,
    MonthlyAmount, MonthlyBalance, Totals, WeeklyGoalProgress,
};
pub use aggregation_traits::{AnalysisServiceTrait, DashboardServiceTrait};
pub use analysis_service::AnalysisService;
pub use dashboard_service::DashboardService;
