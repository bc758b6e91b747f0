use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastMethod {
    /// Mean of past spending days falling on the same weekday.
    WeekdayAverage,
    /// Mean of all past spending days.
    OverallAverage,
    NoHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub predicted_amount: Decimal,
    pub method: ForecastMethod,
    pub sample_days: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingAverage {
    pub window_months: u32,
    pub from_month: String,
    pub to_month: String,
    pub total: Decimal,
    pub average: Decimal,
}
