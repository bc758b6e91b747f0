//! Pure rollups over transaction collections.
//!
//! Callers decide the scope (a filtered set or the whole ledger). Amounts that
//! are not strictly positive contribute nothing.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use super::aggregation_model::{
    CategorySpending, DailySpendingSummary, DayAmount, MonthlyAmount, MonthlyBalance, Totals,
    WeeklyGoalProgress,
};
use crate::transactions::Transaction;
use crate::utils::decimal_utils::{percentage_of, round_amount};
use crate::utils::time_utils::{
    get_days_between, month_bounds, month_key, months_back, months_between, week_bounds,
};

pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for transaction in transactions {
        let Some(amount) = transaction.countable_amount() else {
            continue;
        };
        if transaction.is_income() {
            income += amount;
        } else {
            expense += amount;
        }
    }
    Totals::new(income, expense)
}

/// Distinct category names, sorted.
pub fn category_universe<'a, I>(transactions: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(|t| t.category_name.clone())
        .collect()
}

/// Expense per category, largest first, then by name. Categories without
/// expense are left out.
pub fn spending_by_category<'a, I>(transactions: I) -> Vec<CategorySpending>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_name: HashMap<&str, Decimal> = HashMap::new();
    for transaction in transactions {
        if !transaction.is_expense() {
            continue;
        }
        if let Some(amount) = transaction.countable_amount() {
            *by_name
                .entry(transaction.category_name.as_str())
                .or_insert(Decimal::ZERO) += amount;
        }
    }

    let mut spending: Vec<CategorySpending> = by_name
        .into_iter()
        .filter(|(_, value)| *value > Decimal::ZERO)
        .map(|(name, value)| CategorySpending {
            name: name.to_string(),
            value,
        })
        .collect();
    spending.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    spending
}

/// Expense within the Monday-to-Sunday week containing `today` against a goal.
pub fn weekly_goal<'a, I>(transactions: I, goal: Decimal, today: NaiveDate) -> WeeklyGoalProgress
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (week_start, week_end) = week_bounds(today);
    let spent = expense_between(transactions, week_start, week_end);
    WeeklyGoalProgress {
        goal,
        spent,
        remaining: goal - spent,
        percentage: percentage_of(spent, goal),
        week_start,
        week_end,
    }
}

/// Income minus expense within the calendar month containing `today`.
pub fn monthly_balance<'a, I>(transactions: I, today: NaiveDate) -> MonthlyBalance
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (month_start, month_end) = month_bounds(today);
    let month_totals = totals(
        transactions
            .into_iter()
            .filter(|t| t.transaction_date >= month_start && t.transaction_date <= month_end),
    );
    MonthlyBalance {
        total_income: month_totals.income,
        total_expense: month_totals.expense,
        balance: month_totals.saved,
        month_start,
        month_end,
    }
}

/// Expense per month for the last `months` months, current month included,
/// oldest first and zero-filled.
pub fn monthly_spending<'a, I>(transactions: I, months: u32, today: NaiveDate) -> Vec<MonthlyAmount>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    if months == 0 {
        return Vec::new();
    }
    let start = months_back(today, months - 1);
    let (_, end) = month_bounds(today);
    monthly_expense_series(transactions, start, end)
}

/// Zero-filled expense per month for every month from `start` through `end`.
pub fn monthly_expense_series<'a, I>(
    transactions: I,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<MonthlyAmount>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets: BTreeMap<String, Decimal> = months_between(start, end)
        .into_iter()
        .map(|month| (month_key(month), Decimal::ZERO))
        .collect();

    for transaction in transactions {
        if !transaction.is_expense()
            || transaction.transaction_date < start
            || transaction.transaction_date > end
        {
            continue;
        }
        if let (Some(amount), Some(bucket)) = (
            transaction.countable_amount(),
            buckets.get_mut(&month_key(transaction.transaction_date)),
        ) {
            *bucket += amount;
        }
    }

    buckets
        .into_iter()
        .map(|(month, amount)| MonthlyAmount { month, amount })
        .collect()
}

/// Daily expense statistics over the `days` days ending on `today`.
pub fn daily_spending<'a, I>(transactions: I, days: u32, today: NaiveDate) -> DailySpendingSummary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let start = today - Duration::days(i64::from(days.max(1)) - 1);
    let mut by_day: BTreeMap<NaiveDate, Decimal> = get_days_between(start, today)
        .into_iter()
        .map(|day| (day, Decimal::ZERO))
        .collect();

    for transaction in transactions {
        if !transaction.is_expense() {
            continue;
        }
        if let (Some(amount), Some(bucket)) = (
            transaction.countable_amount(),
            by_day.get_mut(&transaction.transaction_date),
        ) {
            *bucket += amount;
        }
    }

    let series_by_date: Vec<DayAmount> = if days == 0 {
        Vec::new()
    } else {
        by_day
            .into_iter()
            .map(|(date, amount)| DayAmount { date, amount })
            .collect()
    };

    let total: Decimal = series_by_date.iter().map(|d| d.amount).sum();
    let average = if series_by_date.is_empty() {
        Decimal::ZERO
    } else {
        round_amount(total / Decimal::from(series_by_date.len() as u64))
    };

    let mut max_day: Option<&DayAmount> = None;
    let mut min_day: Option<&DayAmount> = None;
    for day in &series_by_date {
        if max_day.map_or(true, |max| day.amount > max.amount) {
            max_day = Some(day);
        }
        if min_day.map_or(true, |min| day.amount < min.amount) {
            min_day = Some(day);
        }
    }

    DailySpendingSummary {
        start,
        end: today,
        days,
        total,
        average,
        max_day: max_day.cloned(),
        min_day: min_day.cloned(),
        series_by_date,
    }
}

fn expense_between<'a, I>(transactions: I, from: NaiveDate, to: NaiveDate) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.is_expense() && t.transaction_date >= from && t.transaction_date <= to)
        .filter_map(Transaction::countable_amount)
        .sum()
}
