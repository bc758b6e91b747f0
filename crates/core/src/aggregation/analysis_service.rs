use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use super::aggregation_engine::{daily_spending, monthly_spending};
use super::aggregation_model::{DailySpendingSummary, MonthlyAmount};
use super::aggregation_traits::AnalysisServiceTrait;
use crate::categories::CategoryServiceTrait;
use crate::errors::{Error, Result};
use crate::transactions::{Transaction, TransactionRepositoryTrait};
use crate::utils::time_utils::{month_bounds, months_back};

const MAX_MONTHS: i64 = 120;
const MAX_DAYS: i64 = 1830;

pub struct AnalysisService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    category_service: Arc<dyn CategoryServiceTrait>,
}

impl AnalysisService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        category_service: Arc<dyn CategoryServiceTrait>,
    ) -> Self {
        AnalysisService {
            transaction_repository,
            category_service,
        }
    }

    fn load_window(
        &self,
        owner_id: &str,
        category_id: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        if let Some(category_id) = category_id {
            self.category_service
                .get_visible_category(owner_id, category_id)?;
        }
        let mut window = self
            .transaction_repository
            .list_transactions_between(owner_id, from, to)?;
        if let Some(category_id) = category_id {
            window.retain(|t| t.category_id == category_id);
        }
        Ok(window)
    }
}

impl AnalysisServiceTrait for AnalysisService {
    fn get_monthly_spending(
        &self,
        owner_id: &str,
        months: i64,
        category_id: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<MonthlyAmount>> {
        if months <= 0 {
            return Ok(Vec::new());
        }
        if months > MAX_MONTHS {
            return Err(Error::invalid_input(format!(
                "months must be at most {}, got {}",
                MAX_MONTHS, months
            )));
        }
        let months = months as u32;
        let (_, end) = month_bounds(today);
        let window = self.load_window(owner_id, category_id, months_back(today, months - 1), end)?;
        Ok(monthly_spending(&window, months, today))
    }

    fn get_daily_spending(
        &self,
        owner_id: &str,
        days: i64,
        category_id: Option<&str>,
        today: NaiveDate,
    ) -> Result<DailySpendingSummary> {
        if !(1..=MAX_DAYS).contains(&days) {
            return Err(Error::invalid_input(format!(
                "days must be between 1 and {}, got {}",
                MAX_DAYS, days
            )));
        }
        let start = today - Duration::days(days - 1);
        let window = self.load_window(owner_id, category_id, start, today)?;
        Ok(daily_spending(&window, days as u32, today))
    }
}
