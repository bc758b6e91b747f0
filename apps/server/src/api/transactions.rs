use std::sync::Arc;

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    main_lib::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use fintrack_core::imports::ImportResult;
use fintrack_core::transactions::{
    Transaction, TransactionFilterRequest, TransactionInput, TransactionQuery,
    TransactionSearchResponse, TransactionSort,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionListParams {
    search: Option<String>,
    category: Option<String>,
    #[serde(rename = "type")]
    transaction_type: Option<String>,
    from: Option<String>,
    to: Option<String>,
    min_amount: Option<String>,
    max_amount: Option<String>,
    sort: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

impl TransactionListParams {
    fn into_query(self, default_page_size: i64) -> ApiResult<TransactionQuery> {
        let filter = TransactionFilterRequest {
            search: self.search,
            category: self.category,
            transaction_type: self.transaction_type,
            from: self.from,
            to: self.to,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        }
        .normalize();
        Ok(TransactionQuery::new(
            filter,
            TransactionSort::from_key(self.sort.as_deref()),
            self.page.unwrap_or(0),
            self.page_size.unwrap_or(default_page_size),
        )?)
    }
}

async fn search_transactions(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<TransactionListParams>,
) -> ApiResult<Json<TransactionSearchResponse>> {
    let query = params.into_query(state.default_page_size)?;
    let response = state
        .transaction_service
        .search_transactions(&user.id, &query)?;
    Ok(Json(response))
}

async fn get_all_transactions(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state.transaction_service.get_transactions(&user.id)?;
    Ok(Json(transactions))
}

async fn get_category_universe(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<String>>> {
    let names = state.transaction_service.get_category_universe(&user.id)?;
    Ok(Json(names))
}

async fn create_transaction(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<TransactionInput>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let created = state
        .transaction_service
        .create_transaction(&user.id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_transaction(
    user: CurrentUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .transaction_service
        .delete_transaction(&user.id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Body is the raw CSV file.
async fn import_transactions(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<ImportResult>> {
    let result = state.import_service.import_csv(&user.id, &body).await?;
    tracing::info!(
        "Import for {}: {} row(s) recorded, {} rejected",
        user.id,
        result.success_count,
        result.error_count
    );
    Ok(Json(result))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(search_transactions).post(create_transaction),
        )
        .route("/transactions/all", get(get_all_transactions))
        .route("/transactions/categories", get(get_category_universe))
        .route("/transactions/import", post(import_transactions))
        .route("/transactions/{id}", delete(delete_transaction))
}
