use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, extract::ApiQuery, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use chrono::NaiveDate;
use fintrack_core::aggregation::MonthlyAmount;
use fintrack_core::forecast::{DailyForecast, RollingAverage};
use fintrack_core::utils::time_utils::today;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DailyParams {
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct RollingAverageParams {
    months: i64,
}

#[derive(Debug, Deserialize)]
struct RollingSeriesParams {
    window: i64,
}

async fn predict_daily(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DailyParams>,
) -> ApiResult<Json<DailyForecast>> {
    let forecast = state.forecast_provider.predict_daily(&user.id, params.date)?;
    Ok(Json(forecast))
}

async fn rolling_average(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<RollingAverageParams>,
) -> ApiResult<Json<RollingAverage>> {
    let average = state
        .forecast_provider
        .rolling_average(&user.id, params.months, today())?;
    Ok(Json(average))
}

async fn rolling_series(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<RollingSeriesParams>,
) -> ApiResult<Json<Vec<MonthlyAmount>>> {
    let series = state
        .forecast_provider
        .rolling_series(&user.id, params.window, today())?;
    Ok(Json(series))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/prediction/daily", get(predict_daily))
        .route("/prediction/rolling-average", get(rolling_average))
        .route("/prediction/rolling-series", get(rolling_series))
}
