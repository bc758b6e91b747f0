use std::sync::Arc;

use crate::{auth::CurrentUser, error::ApiResult, extract::ApiJson, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use fintrack_core::categories::{Category, CategoryInput};

async fn get_categories(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.category_service.get_categories(&user.id)?;
    Ok(Json(categories))
}

async fn create_category(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state
        .category_service
        .create_category(&user.id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn delete_category(
    user: CurrentUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.category_service.delete_category(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(get_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
}
