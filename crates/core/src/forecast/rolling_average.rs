use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use log::debug;
use rust_decimal::Decimal;

use super::forecast_model::{DailyForecast, ForecastMethod, RollingAverage};
use super::forecast_traits::ForecastProviderTrait;
use crate::aggregation::{monthly_expense_series, MonthlyAmount};
use crate::errors::{Error, Result};
use crate::transactions::TransactionRepositoryTrait;
use crate::utils::decimal_utils::round_amount;
use crate::utils::time_utils::{first_of_month, month_bounds, month_key, months_back};

const MAX_WINDOW_MONTHS: i64 = 120;

/// Baseline forecaster built only from averages of past expenses.
pub struct RollingAverageForecaster {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl RollingAverageForecaster {
    pub fn new(transaction_repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        RollingAverageForecaster {
            transaction_repository,
        }
    }

    fn window(window_months: i64) -> Result<u32> {
        if !(1..=MAX_WINDOW_MONTHS).contains(&window_months) {
            return Err(Error::invalid_input(format!(
                "window must be between 1 and {} months, got {}",
                MAX_WINDOW_MONTHS, window_months
            )));
        }
        Ok(window_months as u32)
    }

    /// Expense per calendar day strictly before `before`, spending days only.
    fn daily_expense_before(
        &self,
        owner_id: &str,
        before: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, Decimal>> {
        let mut by_day = BTreeMap::new();
        for transaction in self.transaction_repository.list_transactions(owner_id)? {
            if !transaction.is_expense() || transaction.transaction_date >= before {
                continue;
            }
            if let Some(amount) = transaction.countable_amount() {
                *by_day
                    .entry(transaction.transaction_date)
                    .or_insert(Decimal::ZERO) += amount;
            }
        }
        Ok(by_day)
    }
}

fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = values.iter().sum();
    round_amount(total / Decimal::from(values.len() as u64))
}

impl ForecastProviderTrait for RollingAverageForecaster {
    fn predict_daily(&self, owner_id: &str, date: NaiveDate) -> Result<DailyForecast> {
        let history = self.daily_expense_before(owner_id, date)?;

        let same_weekday: Vec<Decimal> = history
            .iter()
            .filter(|(day, _)| day.weekday() == date.weekday())
            .map(|(_, amount)| *amount)
            .collect();

        let (method, samples) = if !same_weekday.is_empty() {
            (ForecastMethod::WeekdayAverage, same_weekday)
        } else if !history.is_empty() {
            (ForecastMethod::OverallAverage, history.values().copied().collect())
        } else {
            (ForecastMethod::NoHistory, Vec::new())
        };

        debug!(
            "Daily forecast for {} on {} uses {:?} over {} day(s)",
            owner_id,
            date,
            method,
            samples.len()
        );
        Ok(DailyForecast {
            date,
            predicted_amount: mean(&samples),
            method,
            sample_days: samples.len(),
        })
    }

    fn rolling_average(
        &self,
        owner_id: &str,
        window_months: i64,
        today: NaiveDate,
    ) -> Result<RollingAverage> {
        let window = Self::window(window_months)?;
        let start = months_back(today, window - 1);
        let (_, end) = month_bounds(today);

        let ledger = self
            .transaction_repository
            .list_transactions_between(owner_id, start, end)?;
        let series = monthly_expense_series(&ledger, start, end);
        let total: Decimal = series.iter().map(|m| m.amount).sum();

        Ok(RollingAverage {
            window_months: window,
            from_month: month_key(start),
            to_month: month_key(today),
            total,
            average: round_amount(total / Decimal::from(window)),
        })
    }

    fn rolling_series(
        &self,
        owner_id: &str,
        window_months: i64,
        today: NaiveDate,
    ) -> Result<Vec<MonthlyAmount>> {
        let window = Self::window(window_months)? as usize;
        let ledger = self.transaction_repository.list_transactions(owner_id)?;

        let first_spend = ledger
            .iter()
            .filter(|t| t.is_expense() && t.countable_amount().is_some())
            .map(|t| t.transaction_date)
            .min();
        let Some(first_spend) = first_spend else {
            return Ok(Vec::new());
        };

        let (_, end) = month_bounds(today);
        let monthly = monthly_expense_series(&ledger, first_of_month(first_spend), end);
        let amounts: Vec<Decimal> = monthly.iter().map(|m| m.amount).collect();

        Ok(monthly
            .into_iter()
            .enumerate()
            .map(|(index, point)| {
                let from = (index + 1).saturating_sub(window);
                MonthlyAmount {
                    month: point.month,
                    amount: mean(&amounts[from..=index]),
                }
            })
            .collect())
    }
}
