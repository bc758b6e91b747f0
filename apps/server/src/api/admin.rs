//! Administrator routes. Every handler requires the `ADMIN` role.

use std::sync::Arc;

use crate::{auth::AdminUser, error::ApiResult, extract::ApiJson, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use fintrack_core::aggregation::GlobalSummary;
use fintrack_core::categories::{Category, CategoryInput};

async fn get_global_totals(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<GlobalSummary>> {
    let summary = state.dashboard_service.get_global_summary()?;
    Ok(Json(summary))
}

async fn create_global_category(
    AdminUser(admin): AdminUser,
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.category_service.create_global_category(input).await?;
    tracing::info!("Admin {} created global category {}", admin.id, category.name);
    Ok((StatusCode::CREATED, Json(category)))
}

async fn delete_global_category(
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.category_service.delete_global_category(&id).await?;
    tracing::info!("Admin {} deleted global category {}", admin.id, id);
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_any_transaction(
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .transaction_service
        .delete_transaction_as_admin(&id)
        .await?;
    tracing::info!("Admin {} deleted transaction {}", admin.id, id);
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/totals", get(get_global_totals))
        .route("/admin/categories", post(create_global_category))
        .route("/admin/categories/{id}", delete(delete_global_category))
        .route("/admin/transactions/{id}", delete(delete_any_transaction))
}
