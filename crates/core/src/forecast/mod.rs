//! Forecast module - spending forecasts consumed by the dashboard.

mod forecast_model;
mod forecast_traits;
mod rolling_average;

pub use forecast_model::{DailyForecast, ForecastMethod, RollingAverage};
pub use forecast_traits::ForecastProviderTrait;
pub use rolling_average::RollingAverageForecaster;
