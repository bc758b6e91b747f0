use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, extract::ApiJson, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use fintrack_core::goals::{
    AddSavingsInput, SavingsGoal, SavingsGoalInput, SavingsGoalWithProgress,
};
use fintrack_core::utils::time_utils::today;

async fn get_goals(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SavingsGoalWithProgress>>> {
    let goals = state.goal_service.get_goals(&user.id, today())?;
    Ok(Json(goals))
}

async fn create_goal(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<SavingsGoalInput>,
) -> ApiResult<(StatusCode, Json<SavingsGoal>)> {
    let goal = state.goal_service.create_goal(&user.id, input).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn add_savings(
    user: CurrentUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<AddSavingsInput>,
) -> ApiResult<Json<SavingsGoalWithProgress>> {
    let goal = state
        .goal_service
        .add_savings(&user.id, &id, input.amount, today())
        .await?;
    Ok(Json(goal))
}

async fn delete_goal(
    user: CurrentUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/{id}", delete(delete_goal))
        .route("/goals/{id}/savings", post(add_savings))
}
