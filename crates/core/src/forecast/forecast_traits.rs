use chrono::NaiveDate;

use super::forecast_model::{DailyForecast, RollingAverage};
use crate::aggregation::MonthlyAmount;
use crate::errors::Result;

/// Numeric spending forecasts. Implementations may be backed by anything from
/// a simple average to an external model service.
pub trait ForecastProviderTrait: Send + Sync {
    fn predict_daily(&self, owner_id: &str, date: NaiveDate) -> Result<DailyForecast>;

    /// Mean monthly expense over the `window_months` months ending with the
    /// month of `today`.
    fn rolling_average(
        &self,
        owner_id: &str,
        window_months: i64,
        today: NaiveDate,
    ) -> Result<RollingAverage>;

    /// Trailing-window mean for every month from the first month with spending
    /// through the month of `today`.
    fn rolling_series(
        &self,
        owner_id: &str,
        window_months: i64,
        today: NaiveDate,
    ) -> Result<Vec<MonthlyAmount>>;
}
