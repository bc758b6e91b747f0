use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, extract::ApiQuery, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use fintrack_core::aggregation::{DailySpendingSummary, MonthlyAmount};
use fintrack_core::utils::time_utils::today;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthlyParams {
    months: i64,
    category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyParams {
    days: i64,
    category_id: Option<String>,
}

async fn get_monthly_spending(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<MonthlyParams>,
) -> ApiResult<Json<Vec<MonthlyAmount>>> {
    let series = state.analysis_service.get_monthly_spending(
        &user.id,
        params.months,
        params.category_id.as_deref(),
        today(),
    )?;
    Ok(Json(series))
}

async fn get_daily_spending(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DailyParams>,
) -> ApiResult<Json<DailySpendingSummary>> {
    let summary = state.analysis_service.get_daily_spending(
        &user.id,
        params.days,
        params.category_id.as_deref(),
        today(),
    )?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analysis/monthly", get(get_monthly_spending))
        .route("/analysis/daily", get(get_daily_spending))
}
