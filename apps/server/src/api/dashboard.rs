use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use fintrack_core::aggregation::{
    CategorySpending, DashboardSummary, MonthlyBalance, WeeklyGoalProgress,
};
use fintrack_core::utils::time_utils::today;

async fn get_summary(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DashboardSummary>> {
    let summary = state.dashboard_service.get_summary(&user.id, today())?;
    Ok(Json(summary))
}

async fn get_spending_by_category(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CategorySpending>>> {
    let spending = state.dashboard_service.get_spending_by_category(&user.id)?;
    Ok(Json(spending))
}

async fn get_weekly_goal(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<WeeklyGoalProgress>> {
    let progress = state.dashboard_service.get_weekly_goal(&user.id, today())?;
    Ok(Json(progress))
}

async fn get_monthly_balance(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MonthlyBalance>> {
    let balance = state
        .dashboard_service
        .get_monthly_balance(&user.id, today())?;
    Ok(Json(balance))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_summary))
        .route(
            "/dashboard/spending-by-category",
            get(get_spending_by_category),
        )
        .route("/dashboard/weekly-goal", get(get_weekly_goal))
        .route("/dashboard/monthly-balance", get(get_monthly_balance))
}
