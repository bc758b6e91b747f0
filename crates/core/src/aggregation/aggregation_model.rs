use std::iter::Sum;
use std::ops::Add;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income, expense and their difference over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub saved: Decimal,
}

impl Totals {
    pub fn new(income: Decimal, expense: Decimal) -> Self {
        Self {
            income,
            expense,
            saved: income - expense,
        }
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals::new(self.income + rhs.income, self.expense + rhs.expense)
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Totals {
        iter.fold(Totals::default(), Add::add)
    }
}

/// Expense total for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub name: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoalProgress {
    pub goal: Decimal,
    pub spent: Decimal,
    /// Negative once the goal is overspent.
    pub remaining: Decimal,
    /// Zero when the goal itself is zero.
    pub percentage: Decimal,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBalance {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
}

/// Expense total for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAmount {
    pub month: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAmount {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Daily expense statistics over a trailing window of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySpendingSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: u32,
    pub total: Decimal,
    pub average: Decimal,
    /// Earliest day with the highest spend.
    pub max_day: Option<DayAmount>,
    /// Earliest day with the lowest spend.
    pub min_day: Option<DayAmount>,
    /// One entry per day, oldest first, zero-filled.
    pub series_by_date: Vec<DayAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub totals: Totals,
    pub monthly_balance: MonthlyBalance,
    pub weekly_goal: WeeklyGoalProgress,
    pub spending_by_category: Vec<CategorySpending>,
}

/// Administrator view across every ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSummary {
    pub totals: Totals,
    pub transaction_count: usize,
    pub owner_count: usize,
    pub spending_by_category: Vec<CategorySpending>,
}
